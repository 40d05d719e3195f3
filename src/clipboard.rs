// Copyright (C) Pavel Grebnev 2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard is not available: {0}")]
    Unavailable(arboard::Error),

    #[error("Failed to write to the clipboard: {0}")]
    Write(arboard::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedWithFallback,
    Failed,
}

impl CopyOutcome {
    pub fn is_success(self) -> bool {
        self != CopyOutcome::Failed
    }
}

pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

// Keeps one connection to the system clipboard for the whole session.
// The connection is dropped after a failed write and recreated on the next one.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut handle = match self.handle.take() {
            Some(handle) => handle,
            None => arboard::Clipboard::new().map_err(ClipboardError::Unavailable)?,
        };

        handle
            .set_text(text.to_string())
            .map_err(ClipboardError::Write)?;

        self.handle = Some(handle);
        Ok(())
    }
}

pub trait ClipboardConnection {
    fn write(&mut self, text: &str) -> Result<(), arboard::Error>;
}

impl ClipboardConnection for arboard::Clipboard {
    fn write(&mut self, text: &str) -> Result<(), arboard::Error> {
        self.set_text(text.to_string())
    }
}

type ConnectFn<C> = Box<dyn FnMut() -> Result<C, arboard::Error>>;

// Opens a fresh connection for every write. On X11 and Wayland the copied text
// is served by our process, so the connection that wrote it is kept until the
// next write replaces it.
pub struct TemporaryClipboard<C: ClipboardConnection = arboard::Clipboard> {
    connect: ConnectFn<C>,
    hosting_connection: Option<C>,
}

impl Default for TemporaryClipboard<arboard::Clipboard> {
    fn default() -> Self {
        Self::with_connector(Box::new(arboard::Clipboard::new))
    }
}

impl<C: ClipboardConnection> TemporaryClipboard<C> {
    pub fn with_connector(connect: ConnectFn<C>) -> Self {
        Self {
            connect,
            hosting_connection: None,
        }
    }

    pub fn is_hosting_text(&self) -> bool {
        self.hosting_connection.is_some()
    }
}

impl<C: ClipboardConnection> ClipboardWriter for TemporaryClipboard<C> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut connection = (self.connect)().map_err(ClipboardError::Unavailable)?;
        connection.write(text).map_err(ClipboardError::Write)?;

        self.hosting_connection = Some(connection);
        Ok(())
    }
}

pub fn copy_with_fallback(
    primary: &mut dyn ClipboardWriter,
    fallback: &mut dyn ClipboardWriter,
    text: &str,
) -> CopyOutcome {
    let primary_error = match primary.write_text(text) {
        Ok(()) => {
            log::info!("Copied '{}' to the clipboard", text);
            return CopyOutcome::Copied;
        }
        Err(error) => error,
    };
    log::warn!("{}. Trying the fallback clipboard", primary_error);

    match fallback.write_text(text) {
        Ok(()) => {
            log::info!("Copied '{}' to the clipboard using the fallback", text);
            CopyOutcome::CopiedWithFallback
        }
        Err(error) => {
            log::error!("Fallback copy failed: {}", error);
            CopyOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockClipboard {
        should_fail: bool,
        written: Vec<String>,
    }

    impl MockClipboard {
        fn working() -> Self {
            Self {
                should_fail: false,
                written: Vec::new(),
            }
        }

        fn broken() -> Self {
            Self {
                should_fail: true,
                written: Vec::new(),
            }
        }
    }

    impl ClipboardWriter for MockClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.should_fail {
                return Err(ClipboardError::Unavailable(
                    arboard::Error::ClipboardNotSupported,
                ));
            }
            self.written.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_primary_success_does_not_touch_fallback() {
        let mut primary = MockClipboard::working();
        let mut fallback = MockClipboard::working();

        let outcome = copy_with_fallback(&mut primary, &mut fallback, "0x283d46");

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(primary.written, vec!["0x283d46".to_string()]);
        assert!(fallback.written.is_empty());
    }

    #[test]
    fn test_primary_failure_uses_fallback() {
        let mut primary = MockClipboard::broken();
        let mut fallback = MockClipboard::working();

        let outcome = copy_with_fallback(&mut primary, &mut fallback, "0xffa500");

        assert_eq!(outcome, CopyOutcome::CopiedWithFallback);
        assert_eq!(fallback.written, vec!["0xffa500".to_string()]);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_both_failures_are_reported() {
        let mut primary = MockClipboard::broken();
        let mut fallback = MockClipboard::broken();

        let outcome = copy_with_fallback(&mut primary, &mut fallback, "0x000000");

        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(!outcome.is_success());
    }

    struct CountedConnection {
        live_connections: Rc<Cell<usize>>,
        should_fail: bool,
    }

    impl ClipboardConnection for CountedConnection {
        fn write(&mut self, _text: &str) -> Result<(), arboard::Error> {
            if self.should_fail {
                Err(arboard::Error::ClipboardOccupied)
            } else {
                Ok(())
            }
        }
    }

    impl Drop for CountedConnection {
        fn drop(&mut self) {
            self.live_connections.set(self.live_connections.get() - 1);
        }
    }

    fn create_counted_clipboard(
        live_connections: Rc<Cell<usize>>,
        should_fail: Rc<Cell<bool>>,
    ) -> TemporaryClipboard<CountedConnection> {
        TemporaryClipboard::with_connector(Box::new(move || {
            live_connections.set(live_connections.get() + 1);
            Ok(CountedConnection {
                live_connections: live_connections.clone(),
                should_fail: should_fail.get(),
            })
        }))
    }

    #[test]
    fn test_temporary_clipboard_keeps_connection_alive_after_write() {
        let live_connections = Rc::new(Cell::new(0));
        let should_fail = Rc::new(Cell::new(false));
        let mut clipboard = create_counted_clipboard(live_connections.clone(), should_fail);

        clipboard.write_text("0x283d46").unwrap();
        assert_eq!(live_connections.get(), 1);
        assert!(clipboard.is_hosting_text());

        clipboard.write_text("0xffa500").unwrap();
        assert_eq!(live_connections.get(), 1);
    }

    #[test]
    fn test_temporary_clipboard_keeps_previous_text_when_write_fails() {
        let live_connections = Rc::new(Cell::new(0));
        let should_fail = Rc::new(Cell::new(false));
        let mut clipboard =
            create_counted_clipboard(live_connections.clone(), should_fail.clone());
        clipboard.write_text("0x283d46").unwrap();

        should_fail.set(true);
        assert!(clipboard.write_text("0x000000").is_err());

        assert_eq!(live_connections.get(), 1);
        assert!(clipboard.is_hosting_text());
    }

    #[test]
    fn test_fallback_copy_leaves_a_live_connection() {
        let live_connections = Rc::new(Cell::new(0));
        let mut primary = MockClipboard::broken();
        let mut fallback =
            create_counted_clipboard(live_connections.clone(), Rc::new(Cell::new(false)));

        let outcome = copy_with_fallback(&mut primary, &mut fallback, "0x102030");

        assert_eq!(outcome, CopyOutcome::CopiedWithFallback);
        assert_eq!(live_connections.get(), 1);
    }

    #[test]
    fn test_clipboard_error_messages() {
        let error = ClipboardError::Write(arboard::Error::ClipboardOccupied);
        assert!(error
            .to_string()
            .starts_with("Failed to write to the clipboard"));
    }
}
