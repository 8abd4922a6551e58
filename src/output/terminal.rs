use crate::constants::DEFAULT_LINE_NUMBER_WIDTH;
use crate::core_types::LineRecord;
use std::io::{self, Write};

/// Writes numbered lines as `"{number:>width$} | {text}"`.
///
/// Lines keep their own numbers, so a filtered selection or a later page
/// shows the positions the lines have in the file.
pub fn write_lines<'a, I>(writer: &mut dyn Write, lines: I, num_width: usize) -> io::Result<()>
where
    I: IntoIterator<Item = &'a LineRecord>,
{
    for line in lines {
        write!(writer, "{:>width$} | ", line.number, width = num_width)?;
        writeln!(writer, "{}", line.raw_text)?;
    }
    Ok(())
}

/// Width needed for the largest line number, never below the default.
pub fn line_number_width(largest_number: usize) -> usize {
    if largest_number == 0 {
        1
    } else {
        ((largest_number as f64).log10().floor() as usize) + 1
    }
    .max(DEFAULT_LINE_NUMBER_WIDTH)
}
