//! Fixed lookup tables that decide what counts as prose.
//!
//! Environments in the skip set are removed wholesale. Commands map to either
//! [`CommandAction::Preserve`] (drop the command, keep the text of its braced arguments) or
//! [`CommandAction::Discard`] (drop the command and its arguments). Anything not listed is
//! preserved, which loses the least prose when an unfamiliar macro turns up.

use std::collections::{HashMap, HashSet};

/// Environments whose bodies never contain countable prose. Starred forms are added automatically.
pub const SKIP_ENVIRONMENTS: &[&str] = &[
    "align",
    "displaymath",
    "equation",
    "figure",
    "gather",
    "lstlisting",
    "math",
    "multline",
    "table",
    "tabular",
    "thebibliography",
    "tikzpicture",
    "verbatim",
];

/// Commands whose arguments are metadata rather than prose.
pub const DISCARD_COMMANDS: &[&str] = &[
    "addbibresource",
    "autoref",
    "begin",
    "bibliography",
    "bibliographystyle",
    "chapter",
    "cite",
    "citealp",
    "citep",
    "citet",
    "color",
    "cref",
    "Cref",
    "documentclass",
    "end",
    "eqref",
    "graphicspath",
    "hspace",
    "hypersetup",
    "include",
    "includegraphics",
    "input",
    "label",
    "newcommand",
    "newenvironment",
    "nocite",
    "pageref",
    "pagestyle",
    "paragraph",
    "ref",
    "renewcommand",
    "section",
    "setcounter",
    "setlength",
    "subsection",
    "subsubsection",
    "thispagestyle",
    "url",
    "usepackage",
    "vspace",
];

/// Commands whose braced argument is displayed prose.
pub const PRESERVE_COMMANDS: &[&str] = &[
    "caption",
    "emph",
    "footnote",
    "mbox",
    "textbf",
    "textit",
    "textrm",
    "textsc",
    "textsf",
    "texttt",
    "underline",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the reducer does with a command's arguments.
pub enum CommandAction {
    /// Remove the command name and delimiters, keep the braced content.
    Preserve,
    /// Remove the command together with all of its arguments.
    Discard,
}

#[derive(Clone, Debug)]
/// Environment set and command table consulted by the reducer.
pub struct Policy {
    environments: HashSet<String>,
    commands: HashMap<String, CommandAction>,
}

impl Default for Policy {
    fn default() -> Self {
        let mut policy = Self {
            environments: HashSet::new(),
            commands: HashMap::new(),
        };
        for name in SKIP_ENVIRONMENTS {
            policy = policy.skip_environment(name);
        }
        for name in DISCARD_COMMANDS {
            policy = policy.with_command(name, CommandAction::Discard);
        }
        for name in PRESERVE_COMMANDS {
            policy = policy.with_command(name, CommandAction::Preserve);
        }
        policy
    }
}

impl Policy {
    #[must_use]
    /// Adds an environment, and its starred form, to the skip set.
    pub fn skip_environment(mut self, name: &str) -> Self {
        let name = name.trim_end_matches('*');
        self.environments.insert(name.to_string());
        self.environments.insert(format!("{name}*"));
        self
    }

    #[must_use]
    /// Sets the action for a command name given without its backslash.
    pub fn with_command(mut self, name: &str, action: CommandAction) -> Self {
        self.commands
            .insert(name.trim_start_matches('\\').to_string(), action);
        self
    }

    #[must_use]
    /// Whether `\begin{name}...\end{name}` is removed wholesale.
    pub fn skips(&self, name: &str) -> bool {
        self.environments.contains(name)
    }

    #[must_use]
    /// Action for a command name, defaulting to [`CommandAction::Preserve`].
    pub fn action(&self, name: &str) -> CommandAction {
        self.commands
            .get(name)
            .copied()
            .unwrap_or(CommandAction::Preserve)
    }
}
