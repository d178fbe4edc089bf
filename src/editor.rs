//! Raw-text editing buffer over the active definition.

use crate::error::Result;
use crate::session::FormSession;

/// Holds the user's raw schema text.
///
/// The buffer is preserved verbatim on every update, including failing ones,
/// so the user can correct a typo instead of losing their edit. The active
/// definition only changes when the text passes the validator gate.
#[derive(Debug, Clone, Default)]
pub struct SchemaEditor {
    text: String,
    last_error: Option<String>,
}

impl SchemaEditor {
    /// An editor pre-filled with the session's current definition.
    pub fn for_session(session: &FormSession) -> Result<Self> {
        Ok(Self {
            text: session.definition().to_json_pretty()?,
            last_error: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The user-visible message from the last failed update, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record the new buffer text and try to make it the active definition.
    pub fn update(&mut self, text: impl Into<String>, session: &mut FormSession) -> Result<()> {
        self.text = text.into();
        match session.apply_text(&self.text) {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Refresh the buffer from the session, e.g. after a generative swap.
    pub fn reload(&mut self, session: &FormSession) -> Result<()> {
        self.text = session.definition().to_json_pretty()?;
        self.last_error = None;
        Ok(())
    }
}
