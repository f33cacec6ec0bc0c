// SPDX-License-Identifier: MIT

//! Model identifier parsing (spec.md section 3, "ModelIdentifier").

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Openrouter,
    Ollama,
    Openai,
    Gemini,
}

crate::simple_display! {
    Provider {
        Openrouter => "openrouter",
        Ollama => "ollama",
        Openai => "openai",
        Gemini => "gemini",
    }
}

impl Provider {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "openrouter" => Some(Provider::Openrouter),
            "ollama" => Some(Provider::Ollama),
            "openai" => Some(Provider::Openai),
            "gemini" => Some(Provider::Gemini),
            _ => None,
        }
    }
}

/// Either a routed provider, or the native `claude`/`default` path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedModelId {
    Native,
    Routed { provider: Provider, model: String, sub: Option<String> },
}

impl fmt::Display for ParsedModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedModelId::Native => write!(f, "default"),
            ParsedModelId::Routed { provider, model, sub: Some(sub) } => {
                write!(f, "{provider}/{model}/{sub}")
            }
            ParsedModelId::Routed { provider, model, sub: None } => write!(f, "{provider}/{model}"),
        }
    }
}

/// String of form `provider/model[/sub]` or special `default|claude`.
///
/// `parseProvider` / `isValidModelId` from spec.md section 3 and the testable
/// property in section 8 ("Model-id round-trip").
pub fn parse_model_id(id: &str) -> Option<ParsedModelId> {
    if id == "default" || id == "claude" {
        return Some(ParsedModelId::Native);
    }
    let mut parts = id.splitn(3, '/');
    let provider_str = parts.next()?;
    let model = parts.next()?;
    if model.is_empty() {
        return None;
    }
    let sub = parts.next().map(str::to_string);
    let provider = Provider::from_str(provider_str)?;
    Some(ParsedModelId::Routed { provider, model: model.to_string(), sub })
}

pub fn is_valid_model_id(id: &str) -> bool {
    parse_model_id(id).is_some()
}

#[cfg(test)]
#[path = "model_id_tests.rs"]
mod tests;
