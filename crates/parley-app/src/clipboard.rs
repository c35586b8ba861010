use parley_common::ParleyError;

/// System clipboard backed by `arboard`.
///
/// Created lazily on the first copy so a headless environment only fails
/// when the affordance is actually used.
pub struct Clipboard {
    inner: arboard::Clipboard,
}

impl Clipboard {
    pub fn new() -> Result<Self, ParleyError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ParleyError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), ParleyError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ParleyError::Clipboard(e.to_string()))
    }
}
