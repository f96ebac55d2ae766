//! Relay route table
//!
//! Each code-assist endpoint is described by a [`RouteSpec`]; a single handler
//! drives all of them.

use serde::Serialize;
use std::collections::BTreeMap;

/// Relay endpoints backed by the chat-completion API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    GenerateCode,
    ExplainCode,
    DebugCode,
    RunCode,
}

/// Transformation applied to the model output before it is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    None,
    MarkdownToHtml,
}

/// Static description of a relay route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    /// HTTP path
    pub path: &'static str,
    /// Body field carrying the user text
    pub input_field: &'static str,
    /// Response field carrying the result
    pub output_field: &'static str,
    /// Prompt with a single `{input}` placeholder
    pub template: &'static str,
    pub post_process: PostProcess,
    /// 400 message when the input field is missing or empty
    pub missing_input_message: &'static str,
}

pub const INPUT_PLACEHOLDER: &str = "{input}";

static GENERATE_CODE: RouteSpec = RouteSpec {
    path: "/generate-code",
    input_field: "query",
    output_field: "code",
    template: "Generate code for the following description: {input}.",
    post_process: PostProcess::None,
    missing_input_message: "No description provided. Please provide a description to generate code.",
};

static EXPLAIN_CODE: RouteSpec = RouteSpec {
    path: "/explain-code",
    input_field: "code",
    output_field: "explanation",
    template: "Explain the following code: {input}",
    post_process: PostProcess::MarkdownToHtml,
    missing_input_message: "No code provided. Please provide code to explain.",
};

static DEBUG_CODE: RouteSpec = RouteSpec {
    path: "/debug-code",
    input_field: "code",
    output_field: "code",
    template: "Solve the errors in the following code and return the updated code with comments showing the changes made:\n\n{input}",
    post_process: PostProcess::None,
    missing_input_message: "No code provided. Please provide code to debug.",
};

static RUN_CODE: RouteSpec = RouteSpec {
    path: "/run-code",
    input_field: "code",
    output_field: "output",
    template: "Compile this code and return the output or any errors as a terminal would:\n\n{input}",
    post_process: PostProcess::None,
    missing_input_message: "No code provided. Please provide code to run.",
};

impl RouteKind {
    pub const ALL: [RouteKind; 4] = [
        RouteKind::GenerateCode,
        RouteKind::ExplainCode,
        RouteKind::DebugCode,
        RouteKind::RunCode,
    ];

    pub fn spec(self) -> &'static RouteSpec {
        match self {
            RouteKind::GenerateCode => &GENERATE_CODE,
            RouteKind::ExplainCode => &EXPLAIN_CODE,
            RouteKind::DebugCode => &DEBUG_CODE,
            RouteKind::RunCode => &RUN_CODE,
        }
    }

    pub fn path(self) -> &'static str {
        self.spec().path
    }
}

impl RouteSpec {
    /// Substitute the user text into the prompt template
    pub fn render_prompt(&self, input: &str) -> String {
        self.template.replacen(INPUT_PLACEHOLDER, input, 1)
    }

    /// Pull the non-empty input string out of a request body
    ///
    /// Non-object bodies, missing keys, non-string values and empty strings
    /// all yield `None`.
    pub fn extract_input<'a>(&self, body: &'a serde_json::Value) -> Option<&'a str> {
        body.get(self.input_field)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Build the single-field JSON response body
    pub fn wrap_output(&self, text: String) -> BTreeMap<&'static str, String> {
        BTreeMap::from([(self.output_field, text)])
    }
}
