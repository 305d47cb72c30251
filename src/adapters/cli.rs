// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument scanner.
//!
//! This module finds the configuration file path in the process arguments. Only
//! the `-c` flag is looked at; every other argument is left alone so the host
//! program can parse its own flags however it likes.

/// The flag that carries the configuration path.
const CONFIG_FLAG: &str = "-c";

/// Returns the configuration path given with `-c`, or an empty string.
///
/// `args` is the complete argument vector, program name included. Two forms
/// are recognized and the first match wins:
/// - `-c=VALUE`
/// - `-c VALUE`
///
/// One pair of surrounding double quotes and then one pair of surrounding
/// single quotes is stripped from the value. A single-character value is
/// returned as is.
///
/// # Examples
///
/// ```rust
/// use cfgpool::adapters::cli::config_file_arg;
///
/// assert_eq!(config_file_arg(&["app", "-c=/etc/app.toml"]), "/etc/app.toml");
/// assert_eq!(config_file_arg(&["app", "-c", "'app.toml'"]), "app.toml");
/// assert_eq!(config_file_arg(&["app", "--verbose"]), "");
/// ```
pub fn config_file_arg<S: AsRef<str>>(args: &[S]) -> String {
    for i in 1..args.len() {
        let arg = args[i].as_ref();

        // Handle -c=value format
        if let Some(value) = arg.strip_prefix("-c=") {
            return unquote(value).to_string();
        }

        // Handle -c value format
        if !arg.is_empty() && args[i - 1].as_ref() == CONFIG_FLAG {
            return unquote(arg).to_string();
        }
    }

    String::new()
}

/// Scans the arguments of the running process, see [`config_file_arg`].
pub fn config_file_arg_from_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    config_file_arg(&args)
}

fn unquote(value: &str) -> &str {
    if value.len() == 1 {
        return value;
    }
    strip_pair(strip_pair(value, '"'), '\'')
}

fn strip_pair(value: &str, quote: char) -> &str {
    value
        .strip_prefix(quote)
        .and_then(|inner| inner.strip_suffix(quote))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAIL: [&str; 2] = ["--someflag", "\"some encapsulated string\""];

    fn argv(head: &[&str]) -> Vec<String> {
        std::iter::once("cmd")
            .chain(head.iter().copied())
            .chain(TAIL)
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_program_name_only() {
        assert_eq!(config_file_arg(&["cmd"]), "");
    }

    #[test]
    fn test_empty_args() {
        let args: [&str; 0] = [];
        assert_eq!(config_file_arg(&args), "");
    }

    #[test]
    fn test_no_config_flag() {
        assert_eq!(config_file_arg(&argv(&["somevalue", "-s"])), "");
    }

    #[test]
    fn test_equals_form() {
        assert_eq!(
            config_file_arg(&argv(&["somevalue", "-c=some/path"])),
            "some/path"
        );
    }

    #[test]
    fn test_equals_form_double_quoted() {
        assert_eq!(
            config_file_arg(&argv(&["somevalue", "-c=\"some/path\""])),
            "some/path"
        );
    }

    #[test]
    fn test_equals_form_single_quoted() {
        assert_eq!(
            config_file_arg(&argv(&["somevalue", "-c='some/path'"])),
            "some/path"
        );
    }

    #[test]
    fn test_separate_form() {
        assert_eq!(
            config_file_arg(&argv(&["somevalue", "-c", "some/path2"])),
            "some/path2"
        );
    }

    #[test]
    fn test_single_character_value() {
        assert_eq!(config_file_arg(&argv(&["somevalue", "-c=p"])), "p");
        assert_eq!(config_file_arg(&argv(&["somevalue", "-c", "p"])), "p");
    }

    #[test]
    fn test_single_quote_character_is_verbatim() {
        assert_eq!(config_file_arg(&["cmd", "-c=\""]), "\"");
        assert_eq!(config_file_arg(&["cmd", "-c", "'"]), "'");
    }

    #[test]
    fn test_nested_quotes_strip_one_layer_each() {
        assert_eq!(config_file_arg(&["cmd", "-c=\"'a b'\""]), "a b");
        assert_eq!(config_file_arg(&["cmd", "-c='\"a\"'"]), "\"a\"");
    }

    #[test]
    fn test_mismatched_quotes_are_kept() {
        assert_eq!(config_file_arg(&["cmd", "-c=\"path'"]), "\"path'");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            config_file_arg(&["cmd", "-c", "first", "-c=second"]),
            "first"
        );
        assert_eq!(
            config_file_arg(&["cmd", "-c=first", "-c", "second"]),
            "first"
        );
    }

    #[test]
    fn test_trailing_flag_without_value() {
        assert_eq!(config_file_arg(&["cmd", "somevalue", "-c"]), "");
    }

    #[test]
    fn test_empty_value_after_flag_is_skipped() {
        assert_eq!(config_file_arg(&["cmd", "-c", "", "other"]), "");
    }

    #[test]
    fn test_long_flag_is_ignored() {
        assert_eq!(config_file_arg(&["cmd", "--c=value", "-cvalue"]), "");
    }
}
