//! Table configuration options.

use core::time::Duration;

/// Configuration options for a [`Table`](crate::table::Table).
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use bjround::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(1)
///     .with_dealer_pause(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Number of decks shuffled at the start of each round.
    pub decks: u8,
    /// Pause between the dealer's narrated steps.
    pub dealer_pause: Duration,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_pause: Duration::from_millis(1500),
        }
    }
}

impl TableOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the pause between dealer steps.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use bjround::TableOptions;
    ///
    /// let options = TableOptions::default().with_dealer_pause(Duration::ZERO);
    /// assert_eq!(options.dealer_pause, Duration::ZERO);
    /// ```
    #[must_use]
    pub const fn with_dealer_pause(mut self, pause: Duration) -> Self {
        self.dealer_pause = pause;
        self
    }
}
