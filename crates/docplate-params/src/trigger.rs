/*
 * trigger.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Trigger model and the inline trigger mini-language.
//!
//! A trigger suffix is a run of `:word` tokens after a placeholder key, e.g.
//! `:empty:remove:row`. Each token is classified by vocabulary, so order does
//! not matter. Unrecognized tokens are ignored: a suffix with no known
//! command parses to a trigger that does nothing.

use std::fmt;

/// Granularity of the document structure a trigger affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// No scope token: the nearest run or paragraph.
    #[default]
    Single,
    Cell,
    Row,
    List,
    Table,
    Section,
}

/// What a trigger does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    /// Drop the target's children and mark it deleted.
    Remove,
    /// Blank the text of the target and everything below it.
    Clear,
    /// No command token was recognized.
    #[default]
    Unknown,
}

/// Firing condition relative to the bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum On {
    #[default]
    Always,
    /// Only when the bound value is empty.
    Empty,
}

impl Scope {
    pub fn from_token(token: &str) -> Option<Scope> {
        match token {
            "cell" => Some(Scope::Cell),
            "row" => Some(Scope::Row),
            "list" => Some(Scope::List),
            "table" => Some(Scope::Table),
            "section" => Some(Scope::Section),
            _ => None,
        }
    }

    /// Token text; `None` for [`Scope::Single`], which has no token.
    pub fn as_token(&self) -> Option<&'static str> {
        match self {
            Scope::Single => None,
            Scope::Cell => Some("cell"),
            Scope::Row => Some("row"),
            Scope::List => Some("list"),
            Scope::Table => Some("table"),
            Scope::Section => Some("section"),
        }
    }
}

impl Command {
    pub fn from_token(token: &str) -> Option<Command> {
        match token {
            "remove" => Some(Command::Remove),
            "clear" => Some(Command::Clear),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&'static str> {
        match self {
            Command::Remove => Some("remove"),
            Command::Clear => Some("clear"),
            Command::Unknown => None,
        }
    }
}

impl On {
    pub fn from_token(token: &str) -> Option<On> {
        match token {
            "always" => Some(On::Always),
            "empty" => Some(On::Empty),
            _ => None,
        }
    }
}

/// A directive attached to a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Trigger {
    pub scope: Scope,
    pub command: Command,
    pub on: On,
}

impl Trigger {
    /// Parse a raw trigger suffix such as ` :empty:remove:list`.
    ///
    /// Returns `None` when the suffix is blank.
    pub fn parse(raw: &str) -> Option<Trigger> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut trigger = Trigger::default();
        for token in raw.split(':').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(on) = On::from_token(token) {
                trigger.on = on;
            } else if let Some(command) = Command::from_token(token) {
                trigger.command = command;
            } else if let Some(scope) = Scope::from_token(token) {
                trigger.scope = scope;
            }
        }
        Some(trigger)
    }
}

/// Canonical suffix: `[:empty][:command][:scope]`.
impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.on == On::Empty {
            write!(f, ":empty")?;
        }
        if let Some(command) = self.command.as_token() {
            write!(f, ":{}", command)?;
        }
        if let Some(scope) = self.scope.as_token() {
            write!(f, ":{}", scope)?;
        }
        Ok(())
    }
}
