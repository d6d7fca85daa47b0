//! Line-oriented parser for the rule file.
//!
//! The file has a config section of `:key(value)` lines, a `;;`
//! separator, then named rule blocks `[Name]{ ... }`, and ends at
//! `;;;;`. Every line is trimmed first; blank lines and `#` comments are
//! skipped everywhere. Malformed lines are dropped one at a time and
//! never abort the parse.

use super::{Config, RuleSet};

/// Marks the end of the config section.
const SECTION_SEPARATOR: &str = ";;";
/// Marks the end of the rule section (and of the file).
const END_MARKER: &str = ";;;;";
const PROTECT_HEADER: &str = "[Protect]{";
const BLOCK_END: &str = "}";
const BY_PROCESS_PREFIX: &str = "(0)";
const BY_TITLE_PREFIX: &str = "(1)";

/// Lines of this many characters or fewer carry no Protect entry.
const MIN_PROTECT_LINE: usize = 3;

#[derive(Debug, Clone, Copy)]
enum Section {
    Config,
    Rules,
    Protect,
    Block(Option<Block>),
}

#[derive(Debug, Clone, Copy)]
enum Block {
    Ordinary,
    Force,
    Include,
    ExInclude,
}

impl Block {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Ordinary" => Some(Self::Ordinary),
            "Force" => Some(Self::Force),
            "Include" => Some(Self::Include),
            "ExInclude" => Some(Self::ExInclude),
            _ => None,
        }
    }

    fn list(self, rules: &mut RuleSet) -> &mut Vec<String> {
        match self {
            Self::Ordinary => &mut rules.ordinary,
            Self::Force => &mut rules.force,
            Self::Include => &mut rules.include,
            Self::ExInclude => &mut rules.ex_include,
        }
    }
}

/// Parses rule-file text into its config and rule sections.
pub fn parse(text: &str) -> (Config, RuleSet) {
    let mut config = Config::default();
    let mut rules = RuleSet::default();
    let mut section = Section::Config;

    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    for line in lines {
        section = match section {
            Section::Config => config_line(line, &mut config),
            Section::Rules => {
                if line == END_MARKER {
                    break;
                }
                rules_line(line)
            }
            Section::Protect => protect_line(line, &mut rules),
            Section::Block(block) => {
                if line == BLOCK_END {
                    Section::Rules
                } else {
                    if let Some(block) = block {
                        block.list(&mut rules).push(line.to_string());
                    }
                    Section::Block(block)
                }
            }
        };
    }

    (config, rules)
}

fn config_line(line: &str, config: &mut Config) -> Section {
    if line == SECTION_SEPARATOR {
        return Section::Rules;
    }
    if let Some(body) = line.strip_prefix(':')
        && let Some((key, value)) = body.split_once('(')
    {
        config.set(key.trim(), value.trim_end_matches(')'));
    }
    Section::Config
}

fn rules_line(line: &str) -> Section {
    if line == PROTECT_HEADER {
        return Section::Protect;
    }
    if line.starts_with('[') {
        let name = line.trim_matches(['[', ']', '{']).trim();
        return Section::Block(Block::from_name(name));
    }
    Section::Rules
}

fn protect_line(line: &str, rules: &mut RuleSet) -> Section {
    if line == BLOCK_END {
        return Section::Rules;
    }
    if line.chars().count() <= MIN_PROTECT_LINE {
        return Section::Protect;
    }
    if let Some(name) = line.strip_prefix(BY_PROCESS_PREFIX) {
        rules.protect.by_process.push(name.to_string());
    } else if let Some(title) = line.strip_prefix(BY_TITLE_PREFIX) {
        rules.protect.by_title.push(title.to_string());
    }
    Section::Protect
}
