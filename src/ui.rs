use serde::Serialize;

#[derive(Serialize)]
pub struct Text<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
}

impl<'a> Text<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            kind: "Text",
            text,
            size: None,
            color: None,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: &'a str) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Serialize)]
pub struct Button<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
    pub action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_file_picker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> Button<'a> {
    pub fn new(text: &'a str, action: &'a str) -> Self {
        Self {
            kind: "Button",
            text,
            action,
            requires_file_picker: None,
            mime_filter: None,
            disabled: None,
            content_description: None,
        }
    }

    pub fn requires_file_picker(mut self, needs: bool) -> Self {
        self.requires_file_picker = Some(needs);
        self
    }

    /// Media type the host picker should offer.
    pub fn mime_filter(mut self, mime: &'a str) -> Self {
        self.mime_filter = Some(mime);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

#[derive(Serialize)]
pub struct Column {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    pub children: Vec<serde_json::Value>,
}

impl Column {
    pub fn new(children: Vec<serde_json::Value>) -> Self {
        Self {
            kind: "Column",
            padding: None,
            children,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }
}

#[derive(Serialize)]
pub struct Progress<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
}

impl<'a> Progress<'a> {
    pub fn new() -> Self {
        Self {
            kind: "Progress",
            text: None,
        }
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }
}

#[derive(Serialize)]
pub struct StepperStep<'a> {
    pub label: &'a str,
    pub state: &'static str,
    pub color: &'static str,
}

/// Horizontal row of numbered workflow steps.
#[derive(Serialize)]
pub struct Stepper<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub steps: Vec<StepperStep<'a>>,
    pub current: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> Stepper<'a> {
    pub fn new(steps: Vec<StepperStep<'a>>, current: usize) -> Self {
        Self {
            kind: "Stepper",
            steps,
            current,
            content_description: None,
        }
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

/// Embedded document viewer bound to a preview URI.
#[derive(Serialize)]
pub struct PdfPreview<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub source_uri: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl<'a> PdfPreview<'a> {
    pub fn new(source_uri: &'a str) -> Self {
        Self {
            kind: "PdfPreview",
            source_uri,
            title: None,
            height: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

#[derive(Serialize)]
pub struct Alert<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'a str,
    pub text: &'a str,
    pub code: &'a str,
    pub dismiss_action: &'a str,
    pub dismiss_text: &'a str,
}

impl<'a> Alert<'a> {
    pub fn new(title: &'a str, text: &'a str, code: &'a str) -> Self {
        Self {
            kind: "Alert",
            title,
            text,
            code,
            dismiss_action: "dismiss_alert",
            dismiss_text: "OK",
        }
    }

    pub fn dismiss_text(mut self, text: &'a str) -> Self {
        self.dismiss_text = text;
        self
    }
}
