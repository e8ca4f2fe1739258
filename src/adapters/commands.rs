use crate::domain::model::NewRecipe;
use crate::utils::error::{RecipeError, Result};
use std::path::Path;

pub const HELP: &str = "\
Commands:
  #<id> | open <id>     show a recipe
  search <query>        search recipes
  page <n>              go to a results page
  servings <n>          change servings of the shown recipe
  bookmark              bookmark / unbookmark the shown recipe
  bookmarks             list bookmarks
  upload <file.toml>    upload a recipe described in a TOML file
  delete <id>           delete one of your recipes
  help                  show this help
  quit                  exit";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(String),
    Search(String),
    Page(usize),
    Servings(u32),
    ToggleBookmark,
    Bookmarks,
    Upload(String),
    Delete(String),
    Help,
    Quit,
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if let Some(fragment) = line.strip_prefix('#') {
            return Ok(Some(Command::Open(fragment.trim().to_string())));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "open" => Command::Open(required(word, rest)?.to_string()),
            "search" => Command::Search(rest.to_string()),
            "page" => Command::Page(number(word, rest)?),
            "servings" => Command::Servings(number(word, rest)?),
            "bookmark" => Command::ToggleBookmark,
            "bookmarks" => Command::Bookmarks,
            "upload" => Command::Upload(required(word, rest)?.to_string()),
            "delete" => Command::Delete(required(word, rest)?.to_string()),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(RecipeError::validation(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

fn required<'a>(command: &str, argument: &'a str) -> Result<&'a str> {
    if argument.is_empty() {
        return Err(RecipeError::validation(format!(
            "'{}' needs an argument",
            command
        )));
    }
    Ok(argument)
}

fn number<T: std::str::FromStr>(command: &str, argument: &str) -> Result<T> {
    required(command, argument)?.parse().map_err(|_| {
        RecipeError::validation(format!("'{}' expects a number, got '{}'", command, argument))
    })
}

/// Reads an add-recipe form from a TOML file.
pub fn load_new_recipe<P: AsRef<Path>>(path: P) -> Result<NewRecipe> {
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| {
        RecipeError::validation(format!(
            "Invalid recipe file {}: {}",
            path.as_ref().display(),
            e
        ))
    })
}
