/*!
 * Line-oriented terminal front end for the editor.
 *
 * The session reads one command per line, turns it into controller calls or
 * `EditEvent`s and prints the rendered view back. Prompts issued by the
 * controller (for example when adding a tag) are answered from the same
 * input stream.
 */

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use log::{error, debug};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::app_controller::{Controller, EditEvent};
use crate::errors::EditorError;
use crate::prompt::OperatorPrompt;

const HELP: &str = "\
commands:
  list                 show all blocks
  select <n>           toggle selection of block n
  tags <n> <text>      replace the tags of block n
  text <n> <text>      replace the text of block n (\\n starts a new line)
  merge                merge the selected contiguous blocks
  tag                  add a tag to the first selected block
  header <text>        replace the header (\\n starts a new line)
  used-tags            list tags added in this session
  load <path>          load a file
  save [path]          save the document
  help                 show this help
  quit                 leave the editor
";

/// One parsed line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    List,
    Select(usize),
    Tags(usize, String),
    Text(usize, String),
    Merge,
    Tag,
    Header(String),
    UsedTags,
    Load(PathBuf),
    Save(Option<PathBuf>),
    Help,
    Quit,
}

// @parses: "<n> <rest>" with an optional rest
fn parse_index_and_text(args: &str) -> Result<(usize, String), EditorError> {
    let (index, text) = match args.split_once(' ') {
        Some((index, text)) => (index, text),
        None => (args, ""),
    };
    let index = parse_index(index)?;
    Ok((index, unescape_newlines(text)))
}

fn parse_index(arg: &str) -> Result<usize, EditorError> {
    arg.trim()
        .parse()
        .map_err(|_| EditorError::Command(format!("expected a block number, got '{}'", arg.trim())))
}

fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

impl FromStr for SessionCommand {
    type Err = EditorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (name, args) = match line.split_once(' ') {
            Some((name, args)) => (name, args),
            None => (line.trim_end(), ""),
        };

        match name {
            "list" | "ls" => Ok(Self::List),
            "select" | "sel" => Ok(Self::Select(parse_index(args)?)),
            "tags" => {
                let (index, text) = parse_index_and_text(args)?;
                Ok(Self::Tags(index, text))
            }
            "text" => {
                let (index, text) = parse_index_and_text(args)?;
                Ok(Self::Text(index, text))
            }
            "merge" => Ok(Self::Merge),
            "tag" => Ok(Self::Tag),
            "header" => Ok(Self::Header(unescape_newlines(args))),
            "used-tags" => Ok(Self::UsedTags),
            "load" if !args.trim().is_empty() => Ok(Self::Load(PathBuf::from(args.trim()))),
            "load" => Err(EditorError::Command("load needs a path".to_string())),
            "save" if args.trim().is_empty() => Ok(Self::Save(None)),
            "save" => Ok(Self::Save(Some(PathBuf::from(args.trim())))),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "" => Err(EditorError::Command("empty command".to_string())),
            other => Err(EditorError::Command(format!("unknown command '{}'", other))),
        }
    }
}

// @struct: Prompt answered by the next input line
struct LinePrompt<'a, R, W> {
    input: &'a mut Lines<R>,
    output: &'a mut W,
}

#[async_trait]
impl<'a, R, W> OperatorPrompt for LinePrompt<'a, R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn request_text(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;

        let line = self
            .input
            .next_line()
            .await
            .map_err(|e| EditorError::Prompt(e.to_string()))?;
        Ok(line.map(|l| l.trim_end_matches('\r').to_string()))
    }
}

/// Interactive editing session over any line source
pub struct EditorSession<R, W> {
    controller: Controller,
    input: Lines<R>,
    output: W,
    output_dir: PathBuf,
}

impl<R, W> EditorSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// `output_dir` is where `save` without a path writes the configured output file
    pub fn new(controller: Controller, input: R, output: W, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            controller,
            input: input.lines(),
            output,
            output_dir: output_dir.into(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Give back the controller and the writer once the session is over
    pub fn into_parts(self) -> (Controller, W) {
        (self.controller, self.output)
    }

    /// Run until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        self.print_view()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.input.next_line().await? else {
                break;
            };

            let command = match line.parse::<SessionCommand>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "error: {}", e)?;
                    continue;
                }
            };

            debug!("Session command: {:?}", command);
            if command == SessionCommand::Quit {
                break;
            }

            if let Err(e) = self.execute(command).await {
                error!("{:#}", e);
                writeln!(self.output, "error: {:#}", e)?;
            }
        }

        Ok(())
    }

    /// Execute one command against the controller
    pub async fn execute(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::List => self.print_view()?,
            SessionCommand::Select(index) => {
                self.controller.apply(EditEvent::ToggleSelection(index))?;
                self.print_view()?;
            }
            SessionCommand::Tags(index, text) => {
                self.controller.apply(EditEvent::Tags { index, text })?;
            }
            SessionCommand::Text(index, text) => {
                self.controller.apply(EditEvent::Text { index, text })?;
            }
            SessionCommand::Merge => {
                match self.controller.merge_selected() {
                    Some(index) => writeln!(self.output, "merged into block {}", index)?,
                    None => writeln!(self.output, "select at least two adjacent blocks to merge")?,
                }
                self.print_view()?;
            }
            SessionCommand::Tag => {
                let mut prompt = LinePrompt {
                    input: &mut self.input,
                    output: &mut self.output,
                };
                if self.controller.add_tag(&mut prompt).await? {
                    self.print_view()?;
                }
            }
            SessionCommand::Header(text) => {
                self.controller.apply(EditEvent::Header(text))?;
            }
            SessionCommand::UsedTags => {
                let tags: Vec<&str> = self.controller.used_tags().iter().map(String::as_str).collect();
                writeln!(self.output, "{}", if tags.is_empty() { "(none)".to_string() } else { tags.join(" ") })?;
            }
            SessionCommand::Load(path) => {
                self.controller.load_file(&path).await?;
                self.print_view()?;
            }
            SessionCommand::Save(path) => {
                let path = path.unwrap_or_else(|| self.default_output_path());
                self.controller.save(&path).await?;
                writeln!(self.output, "saved {}", path.display())?;
            }
            SessionCommand::Help => write!(self.output, "{}", HELP)?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn default_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.controller.config().output_file_name)
    }

    fn print_view(&mut self) -> Result<()> {
        write!(self.output, "{}", self.controller.view())?;
        Ok(())
    }
}

/// Directory used for default saves when the session starts from `input_file`
pub fn output_dir_for(input_file: &Path) -> PathBuf {
    input_file.parent().map(Path::to_path_buf).unwrap_or_default()
}
