use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Общий флаг отмены раунда/игры. Проверяется между ходами и между улицами.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Сбросить флаг перед следующей раздачей.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
