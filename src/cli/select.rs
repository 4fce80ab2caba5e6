// Interactive choice of a download directory
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// List `directories` and read the index of one from `input`
///
/// An empty line or end of input means no choice. Anything that is not a
/// listed index is rejected and the prompt repeats.
pub fn choose_directory(
    directories: &[PathBuf],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<PathBuf>> {
    for (index, directory) in directories.iter().enumerate() {
        writeln!(output, "({index}) {}", display_name(directory))?;
    }
    writeln!(output)?;
    writeln!(output, "Choose a directory or ENTER to exit:")?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let answer = line.trim();
        if answer.is_empty() {
            break;
        }

        match answer.parse::<usize>().ok().and_then(|i| directories.get(i)) {
            Some(directory) => return Ok(Some(directory.clone())),
            None => {
                writeln!(output, "Invalid input. Please enter a number or ENTER to exit.")?;
                output.flush()?;
            }
        }
    }

    writeln!(output, "Exiting...")?;
    Ok(None)
}

fn display_name(directory: &Path) -> String {
    directory
        .file_name()
        .unwrap_or(directory.as_os_str())
        .to_string_lossy()
        .into_owned()
}
