use super::kinds::AcceptedCharacters;

/// Editor metadata recorded on every span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditHandler {
    pub accepted_characters: AcceptedCharacters,
    pub kind: EditHandlerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditHandlerKind {
    Default,
    /// Implicit expressions grow while the user types identifier characters.
    ImplicitExpression {
        keywords: &'static [&'static str],
        accept_trailing_dot: bool,
    },
    /// The closing delimiter the editor should insert, if it is missing.
    AutoComplete {
        auto_complete_string: Option<&'static str>,
        at_end_of_span: bool,
    },
}

impl EditHandler {
    pub fn new(accepted_characters: AcceptedCharacters) -> Self {
        Self {
            accepted_characters,
            kind: EditHandlerKind::Default,
        }
    }

    pub fn implicit_expression(
        keywords: &'static [&'static str],
        accept_trailing_dot: bool,
        accepted_characters: AcceptedCharacters,
    ) -> Self {
        Self {
            accepted_characters,
            kind: EditHandlerKind::ImplicitExpression {
                keywords,
                accept_trailing_dot,
            },
        }
    }

    pub fn auto_complete(at_end_of_span: bool) -> Self {
        Self {
            accepted_characters: AcceptedCharacters::ANY,
            kind: EditHandlerKind::AutoComplete {
                auto_complete_string: None,
                at_end_of_span,
            },
        }
    }

    /// Records the missing delimiter on an auto-complete handler.
    pub fn set_auto_complete_string(&mut self, value: &'static str) {
        if let EditHandlerKind::AutoComplete {
            auto_complete_string,
            ..
        } = &mut self.kind
        {
            *auto_complete_string = Some(value);
        }
    }

    pub fn auto_complete_string(&self) -> Option<&'static str> {
        match self.kind {
            EditHandlerKind::AutoComplete {
                auto_complete_string,
                ..
            } => auto_complete_string,
            _ => None,
        }
    }
}

impl Default for EditHandler {
    fn default() -> Self {
        Self::new(AcceptedCharacters::ANY)
    }
}
