//! Naming styles for operation tags.

use crate::error::NamingError;
use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};
use std::fmt;
use std::str::FromStr;

/// How a service name is rewritten before it prefixes a group tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingStyle {
    /// `userapi`
    #[default]
    Lower,
    /// `USER_API`
    Upper,
    /// `user_api`
    Snake,
    /// `user-api`
    Kebab,
    /// `userApi`
    Camel,
    /// `UserApi`
    Pascal,
}

impl FromStr for NamingStyle {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "lower" => Ok(NamingStyle::Lower),
            "upper" => Ok(NamingStyle::Upper),
            "snake" => Ok(NamingStyle::Snake),
            "kebab" => Ok(NamingStyle::Kebab),
            "camel" => Ok(NamingStyle::Camel),
            "pascal" => Ok(NamingStyle::Pascal),
            _ => Err(NamingError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NamingStyle::Lower => "lower",
            NamingStyle::Upper => "upper",
            NamingStyle::Snake => "snake",
            NamingStyle::Kebab => "kebab",
            NamingStyle::Camel => "camel",
            NamingStyle::Pascal => "pascal",
        };
        f.write_str(name)
    }
}

impl NamingStyle {
    /// Rewrite `content` in this style. Characters that are not letters or
    /// digits only separate words, so the result is safe as a path segment.
    pub fn format(self, content: &str) -> Result<String, NamingError> {
        let snake = content.to_snake_case();
        let words: Vec<&str> = snake.split('_').filter(|w| !w.is_empty()).collect();
        if words.is_empty() {
            return Err(NamingError::Empty(content.to_string()));
        }

        let formatted = match self {
            NamingStyle::Lower => words.concat(),
            NamingStyle::Upper => content.to_shouty_snake_case(),
            NamingStyle::Snake => snake.clone(),
            NamingStyle::Kebab => content.to_kebab_case(),
            NamingStyle::Camel => content.to_lower_camel_case(),
            NamingStyle::Pascal => content.to_pascal_case(),
        };
        Ok(formatted)
    }
}

/// Parse `style` and format `content` with it.
pub fn format_name(style: &str, content: &str) -> Result<String, NamingError> {
    style.parse::<NamingStyle>()?.format(content)
}
