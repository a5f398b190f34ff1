//! Builds the clap command for a binding list and reads flags back out.

use clap::{Arg, ArgAction, ArgMatches, Command, parser::ValueSource, value_parser};

use super::Program;
use crate::resolve::FlagValues;
use crate::value::Kind;
use crate::walk::Binding;

/// Id of the hidden positional collecting extra arguments.
pub(super) const TRAILING: &str = "trailing args";

/// Describes a binding in one line: usage text followed by its environment
/// variable, default and required marker.
fn help_line(binding: &Binding) -> String {
    let mut line = binding.usage.clone().unwrap_or_default();
    let mut push = |part: String| {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&part);
    };
    if let Some(env) = &binding.env {
        push(format!("[env: {env}]"));
    }
    if let Some((value, _)) = &binding.default {
        push(format!("[default: {value}]"));
    }
    if binding.required {
        push("[required]".to_owned());
    }
    line
}

const fn accepts_negative(kind: Kind) -> bool {
    matches!(kind, Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 | Kind::F64)
}

fn flag_arg(key: &str, binding: &Binding) -> Arg {
    let mut arg = Arg::new(key.to_owned())
        .long(key.to_owned())
        .value_name(binding.kind.value_name())
        .value_parser(value_parser!(String))
        .action(ArgAction::Append)
        .help(help_line(binding))
        .hide(binding.hidden);
    if let Some(category) = &binding.category {
        arg = arg.help_heading(category.clone());
    }
    if binding.kind.is_bool() {
        arg = arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true");
    } else if accepts_negative(binding.kind) {
        arg = arg.allow_negative_numbers(true);
    }
    arg
}

/// Lists bindings reachable only through the environment.
fn env_only_section(bindings: &[Binding]) -> Option<String> {
    let mut section = String::new();
    for binding in bindings.iter().filter(|b| b.flag.is_none() && !b.hidden) {
        let Some(env) = &binding.env else {
            continue;
        };
        let mut details = binding.clone();
        details.env = None;
        let line = help_line(&details);
        section.push_str(&if line.is_empty() {
            format!("  {env}\n")
        } else {
            format!("  {env}  {line}\n")
        });
    }
    (!section.is_empty()).then(|| format!("Environment:\n{}", section.trim_end()))
}

/// Builds the command accepting one long flag per binding that has one.
pub(super) fn build(program: &Program, bindings: &[Binding]) -> Command {
    let mut command = Command::new(program.name.clone()).arg(
        Arg::new(TRAILING)
            .num_args(0..)
            .action(ArgAction::Append)
            .value_parser(value_parser!(String))
            .hide(true),
    );
    if let Some(usage) = &program.usage {
        command = command.about(usage.clone());
    }
    if let Some(description) = &program.description {
        let long = program.usage.as_ref().map_or_else(
            || description.clone(),
            |usage| format!("{usage}\n\n{description}"),
        );
        command = command.long_about(long);
    }
    if let Some(version) = &program.version {
        command = command.version(version.clone());
    }
    for binding in bindings {
        if let Some(key) = &binding.flag {
            command = command.arg(flag_arg(key, binding));
        }
    }
    if let Some(section) = env_only_section(bindings) {
        command = command.after_help(section);
    }
    command
}

/// Values given on the command line, keyed by flag.
pub(super) fn flag_values(matches: &ArgMatches, bindings: &[Binding]) -> FlagValues {
    bindings
        .iter()
        .filter_map(|binding| binding.flag.as_deref())
        .filter(|key| matches.value_source(key) == Some(ValueSource::CommandLine))
        .filter_map(|key| {
            let values = matches.try_get_many::<String>(key).ok().flatten()?;
            Some((key.to_owned(), values.cloned().collect()))
        })
        .collect()
}

/// Extra positional arguments.
pub(super) fn trailing(matches: &ArgMatches) -> Vec<String> {
    matches
        .try_get_many::<String>(TRAILING)
        .ok()
        .flatten()
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
