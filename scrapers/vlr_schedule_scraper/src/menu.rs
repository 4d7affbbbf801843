use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Scrape { pages: u32 },
    Exit,
}

/// Interactive prompt. Invalid input re-prompts instead of failing.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn next_action(&mut self) -> io::Result<MenuAction> {
        loop {
            writeln!(self.output, "Please choose an option:")?;
            writeln!(self.output, "1. Scrape VLR matches")?;
            writeln!(self.output, "2. Exit")?;

            let Some(selection) = self.prompt("Enter your choice (1 or 2): ")? else {
                return Ok(MenuAction::Exit);
            };

            match selection.as_str() {
                "1" => {
                    return Ok(match self.read_page_count()? {
                        Some(pages) => MenuAction::Scrape { pages },
                        None => MenuAction::Exit,
                    });
                }
                "2" => return Ok(MenuAction::Exit),
                _ => writeln!(self.output, "Invalid selection. Please try again.\n")?,
            }
        }
    }

    fn read_page_count(&mut self) -> io::Result<Option<u32>> {
        loop {
            let Some(answer) = self.prompt("Enter the number of pages to scrape: ")? else {
                return Ok(None);
            };
            match answer.parse::<u32>() {
                Ok(pages) if pages > 0 => return Ok(Some(pages)),
                _ => writeln!(self.output, "Please enter a positive whole number.")?,
            }
        }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
