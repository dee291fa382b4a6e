//! The application: poll an IR receiver, show each code on a character display, log it, revert.
//!
//! See [`PollLoop`] for usage examples.

use core::fmt::Write as _;

use embassy_time::{Duration, Instant, Timer};
use heapless::String;

use crate::{
    CODE_LABEL, CharDisplay, CodeLog, DecodeResult, HOLD_DURATION, IDLE_TEXT, IrReceiver,
    LCD_COLS, LCD_ROWS, LOG_PREFIX, Never, POLL_INTERVAL, Result, STARTUP_TEXT,
};

/// Settings for [`PollLoop`]. `Default` gives the 16x2 layout and one second hold.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PollLoopConfig {
    pub rows: u8,
    pub cols: u8,
    /// Shown once by `initialize`.
    pub startup_text: &'static str,
    /// Shown each time the hold ends. Differs from `startup_text` by default, matching the
    /// messages the device has always shown.
    pub idle_text: &'static str,
    pub code_label: &'static str,
    pub hold: Duration,
    pub poll_interval: Duration,
    /// Also print `0x<HEX>` on the second row while showing a code.
    pub show_code_on_display: bool,
}

impl PollLoopConfig {
    pub const DEFAULT: Self = Self {
        rows: LCD_ROWS,
        cols: LCD_COLS,
        startup_text: STARTUP_TEXT,
        idle_text: IDLE_TEXT,
        code_label: CODE_LABEL,
        hold: HOLD_DURATION,
        poll_interval: POLL_INTERVAL,
        show_code_on_display: false,
    };

    #[must_use]
    pub const fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    #[must_use]
    pub const fn with_idle_text(mut self, idle_text: &'static str) -> Self {
        self.idle_text = idle_text;
        self
    }

    #[must_use]
    pub const fn with_code_on_display(mut self, show_code_on_display: bool) -> Self {
        self.show_code_on_display = show_code_on_display;
        self
    }
}

impl Default for PollLoopConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the loop is in its idle/show cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Waiting message on the display, receiver armed.
    Idle,
    /// A code is on the display until `until`.
    Showing { code: u32, until: Instant },
}

/// What a single [`PollLoop::tick`] did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Idle and nothing (or only a fault) came from the receiver.
    Waiting,
    /// A code was decoded, displayed and logged.
    Shown(u32),
    /// Still inside the hold.
    Holding,
    /// The hold ended and the idle message is back.
    Reverted,
}

/// Drives the idle → showing → idle cycle over injected peripherals.
///
/// The display hold is a timed state, not a blocking delay: each [`PollLoop::tick`] is given
/// the current time and returns right away.
///
/// # Examples
/// ```
/// use embassy_futures::block_on;
/// use embassy_time::Instant;
/// use ir_display::{DecodeResult, IrReceiver, PollLoop, PollLoopConfig, TickOutcome, VirtualLcd};
///
/// struct OneCode(Option<u32>);
///
/// impl IrReceiver for OneCode {
///     fn start_listening(&mut self) {}
///     fn try_decode(&mut self) -> DecodeResult {
///         self.0.map_or(DecodeResult::NoSignal, DecodeResult::Value)
///     }
///     fn resume_listening(&mut self) {
///         self.0 = None;
///     }
/// }
///
/// struct Quiet;
///
/// impl ir_display::CodeLog for Quiet {
///     fn print(&mut self, _: &str) {}
///     fn println(&mut self, _: &str) {}
/// }
///
/// let mut poll_loop = PollLoop::new(
///     OneCode(Some(0x45)),
///     VirtualLcd::<2, 16>::new(),
///     Quiet,
///     PollLoopConfig::default(),
/// );
/// block_on(async {
///     poll_loop.initialize().await;
///     let start = Instant::from_millis(0);
///     assert_eq!(poll_loop.tick(start).await.ok(), Some(TickOutcome::Shown(0x45)));
///     assert_eq!(poll_loop.display().row(0), "IR Code:");
///     let later = Instant::from_millis(1000);
///     assert_eq!(poll_loop.tick(later).await.ok(), Some(TickOutcome::Reverted));
///     assert_eq!(poll_loop.display().row(0), "Waiting for IR");
/// });
/// ```
pub struct PollLoop<R, D, L> {
    receiver: R,
    display: D,
    log: L,
    config: PollLoopConfig,
    state: LoopState,
}

impl<R, D, L> PollLoop<R, D, L>
where
    R: IrReceiver,
    D: CharDisplay,
    L: CodeLog,
{
    /// Take ownership of the peripherals. Nothing is touched until [`PollLoop::initialize`].
    #[must_use]
    pub const fn new(receiver: R, display: D, log: L, config: PollLoopConfig) -> Self {
        Self {
            receiver,
            display,
            log,
            config,
            state: LoopState::Idle,
        }
    }

    /// Set up the display, show the startup message and arm the receiver.
    pub async fn initialize(&mut self) {
        self.display.begin(self.config.rows, self.config.cols).await;
        self.display.clear().await;
        self.display.print(self.config.startup_text).await;
        self.receiver.start_listening();
        self.state = LoopState::Idle;
        #[cfg(feature = "defmt")]
        defmt::info!("Poll loop initialized");
    }

    /// Advance the cycle once. Never waits.
    ///
    /// # Errors
    /// Returns [`crate::Error::FormatError`] if a code cannot be rendered as hex text.
    pub async fn tick(&mut self, now: Instant) -> Result<TickOutcome> {
        match self.state {
            LoopState::Idle => match self.receiver.try_decode() {
                DecodeResult::Value(code) => {
                    self.show(code, now).await?;
                    Ok(TickOutcome::Shown(code))
                }
                DecodeResult::Fault => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("IR decode fault, treated as no signal");
                    Ok(TickOutcome::Waiting)
                }
                DecodeResult::NoSignal => Ok(TickOutcome::Waiting),
            },
            LoopState::Showing { until, .. } if now >= until => {
                self.display.clear().await;
                self.display.print(self.config.idle_text).await;
                self.state = LoopState::Idle;
                Ok(TickOutcome::Reverted)
            }
            LoopState::Showing { .. } => Ok(TickOutcome::Holding),
        }
    }

    /// Initialize, then tick forever at the configured poll interval.
    ///
    /// # Errors
    /// Returns the first error from [`PollLoop::tick`].
    pub async fn run(mut self) -> Result<Never> {
        self.initialize().await;
        loop {
            self.tick(Instant::now()).await?;
            Timer::after(self.config.poll_interval).await;
        }
    }

    async fn show(&mut self, code: u32, now: Instant) -> Result<()> {
        let hex = hex_text(code)?;

        self.display.clear().await;
        self.display.set_cursor(0, 0).await;
        self.display.print(self.config.code_label).await;
        self.display.set_cursor(1, 0).await;
        if self.config.show_code_on_display {
            self.display.print("0x").await;
            self.display.print(&hex).await;
        }

        self.log.print(LOG_PREFIX);
        self.log.println(&hex);

        self.receiver.resume_listening();
        self.state = LoopState::Showing {
            code,
            until: now.checked_add(self.config.hold).unwrap_or(Instant::MAX),
        };
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &PollLoopConfig {
        &self.config
    }

    #[must_use]
    pub const fn receiver(&self) -> &R {
        &self.receiver
    }

    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub const fn log(&self) -> &L {
        &self.log
    }

    /// Give the peripherals back.
    #[must_use]
    pub fn into_parts(self) -> (R, D, L) {
        (self.receiver, self.display, self.log)
    }
}

/// Uppercase hex with no leading zeros, as a serial console's `HEX` format prints it.
///
/// # Errors
/// Returns [`crate::Error::FormatError`] if the text does not fit (it always fits a `u32`).
pub fn hex_text(code: u32) -> Result<String<8>> {
    let mut hex = String::new();
    write!(hex, "{code:X}")?;
    Ok(hex)
}
