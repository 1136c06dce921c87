#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A click (or keyboard activation) on an anchor element, carrying the
/// anchor attributes the router needs.
#[derive(Debug, Clone, Default)]
pub struct LinkActivation {
    pub href: Option<String>,
    pub target: Option<String>,
    pub rel: Option<String>,
    pub download: bool,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl LinkActivation {
    pub fn new(href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            ..Self::default()
        }
    }

    /// Activation on an element with no anchor ancestor.
    pub fn without_href() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    pub fn with_rel(mut self, rel: &str) -> Self {
        self.rel = Some(rel.to_string());
        self
    }

    pub fn with_download(mut self) -> Self {
        self.download = true;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The destination, if this activation should be handled in-app.
    ///
    /// Declines when the browser must keep the event: an explicit target,
    /// an `external` rel token, a non root-relative href, a download link,
    /// a modified or non-primary click, or an event another handler
    /// already consumed.
    pub fn in_app_destination(&self) -> Option<&str> {
        if self.default_prevented || self.download {
            return None;
        }
        if self.button != MouseButton::Primary || self.modifiers.any() {
            return None;
        }
        if self.target.as_deref().is_some_and(|target| !target.is_empty()) {
            return None;
        }
        if self.is_external() {
            return None;
        }

        let href = self.href.as_deref()?;
        is_root_relative(href).then_some(href)
    }

    fn is_external(&self) -> bool {
        self.rel.as_deref().is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case("external"))
        })
    }
}

/// `/path` but not protocol-relative `//host/path`.
pub fn is_root_relative(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}
