use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::str::FromStr;
use crate::error::{CliError, CliResult};

/// Line based question/answer over any reader and writer. Command output goes through it too
pub struct Prompter<R,W> {
    input:R,
    output:W,
}

pub fn stdio() -> Prompter<StdinLock<'static>,Stdout> {
    Prompter::new(io::stdin().lock(),io::stdout())
}

impl<R:BufRead,W:Write> Prompter<R,W> {

    pub fn new(input:R,output:W) -> Self {
        Self{input,output}
    }

    pub fn say(&mut self,message:&str) -> CliResult<()> {
        writeln!(self.output,"{}",message)?;
        Ok(())
    }

    /// asks until the answer parses as T
    pub fn value<T>(&mut self,message:&str) -> CliResult<T>
    where T:FromStr, <T as FromStr>::Err:Display
    {
        loop {
            let answer = self.ask(message)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(e) => self.say(&format!("invalid value {:?}: {}",answer,e))?
            }
        }
    }

    /// yes/no question defaulting to no
    pub fn confirm(&mut self,message:&str) -> CliResult<bool> {
        let answer = self.ask(&format!("{} [y/N]",message))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(),"y" | "yes"))
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self,message:&str) -> CliResult<String> {
        write!(self.output,"{}: ",message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::Input(format!("no answer given to {:?}",message)));
        }
        Ok(line.trim().to_string())
    }
}
