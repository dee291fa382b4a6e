//! Host-level tests for the poll loop over a scripted receiver, a virtual LCD and a captured log.

use std::collections::VecDeque;

use embassy_futures::block_on;
use embassy_time::{Duration, Instant};
use ir_display::{
    CodeLog, DecodeResult, IrReceiver, LoopState, PollLoop, PollLoopConfig, TickOutcome,
    VirtualLcd,
};

#[derive(Default)]
struct ScriptedReceiver {
    script: VecDeque<DecodeResult>,
    starts: usize,
    polls: usize,
    resumes: usize,
}

impl ScriptedReceiver {
    fn new(script: impl IntoIterator<Item = DecodeResult>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl IrReceiver for ScriptedReceiver {
    fn start_listening(&mut self) {
        self.starts += 1;
    }

    fn try_decode(&mut self) -> DecodeResult {
        self.polls += 1;
        self.script.pop_front().unwrap_or_default()
    }

    fn resume_listening(&mut self) {
        self.resumes += 1;
    }
}

#[derive(Default)]
struct SerialLog {
    current: String,
    lines: Vec<String>,
}

impl CodeLog for SerialLog {
    fn print(&mut self, text: &str) {
        self.current.push_str(text);
    }

    fn println(&mut self, text: &str) {
        self.current.push_str(text);
        self.lines.push(std::mem::take(&mut self.current));
    }
}

type TestLoop = PollLoop<ScriptedReceiver, VirtualLcd<2, 16>, SerialLog>;

fn started_with(script: impl IntoIterator<Item = DecodeResult>, config: PollLoopConfig) -> TestLoop {
    let mut poll_loop = PollLoop::new(
        ScriptedReceiver::new(script),
        VirtualLcd::new(),
        SerialLog::default(),
        config,
    );
    block_on(poll_loop.initialize());
    poll_loop
}

fn started(script: impl IntoIterator<Item = DecodeResult>) -> TestLoop {
    started_with(script, PollLoopConfig::default())
}

fn tick(poll_loop: &mut TestLoop, millis: u64) -> TickOutcome {
    block_on(poll_loop.tick(Instant::from_millis(millis))).expect("tick should not fail")
}

#[test]
fn initialize_shows_startup_text_and_arms_receiver() {
    let poll_loop = started([]);
    assert_eq!(poll_loop.display().geometry(), (2, 16));
    assert_eq!(poll_loop.display().row(0), "Waiting for IR!");
    assert_eq!(poll_loop.display().row(1), "");
    assert_eq!(poll_loop.receiver().starts, 1);
    assert_eq!(poll_loop.receiver().polls, 0);
    assert!(poll_loop.log().lines.is_empty());
    assert_eq!(poll_loop.state(), LoopState::Idle);
}

#[test]
fn no_value_leaves_display_and_log_untouched() {
    let mut poll_loop = started([DecodeResult::NoSignal]);
    let clears_before = poll_loop.display().clear_count();

    assert_eq!(tick(&mut poll_loop, 0), TickOutcome::Waiting);

    assert_eq!(poll_loop.display().row(0), "Waiting for IR!");
    assert_eq!(poll_loop.display().clear_count(), clears_before);
    assert!(poll_loop.log().lines.is_empty());
    assert!(poll_loop.log().current.is_empty());
    assert_eq!(poll_loop.receiver().resumes, 0);
}

#[test]
fn fault_is_treated_as_no_signal() {
    assert_eq!(DecodeResult::Fault.code(), None);
    let mut poll_loop = started([DecodeResult::Fault]);
    let clears_before = poll_loop.display().clear_count();

    assert_eq!(tick(&mut poll_loop, 0), TickOutcome::Waiting);

    assert_eq!(poll_loop.state(), LoopState::Idle);
    assert_eq!(poll_loop.display().row(0), "Waiting for IR!");
    assert_eq!(poll_loop.display().clear_count(), clears_before);
    assert!(poll_loop.log().lines.is_empty());
    assert_eq!(poll_loop.receiver().resumes, 0);
}

#[test]
fn code_is_logged_as_natural_width_hex() {
    let mut poll_loop = started([DecodeResult::Value(0x1A_2B3C)]);

    assert_eq!(tick(&mut poll_loop, 0), TickOutcome::Shown(0x1A_2B3C));

    assert_eq!(poll_loop.log().lines, ["Received IR code: 0x1A2B3C"]);
    assert!(poll_loop.log().current.is_empty());
}

#[test]
fn zero_code_shows_label_then_reverts_to_idle_text() {
    let mut poll_loop = started([DecodeResult::Value(0)]);

    assert_eq!(tick(&mut poll_loop, 0), TickOutcome::Shown(0));
    assert_eq!(poll_loop.log().lines, ["Received IR code: 0x0"]);
    assert_eq!(poll_loop.display().row(0), "IR Code:");
    assert_eq!(poll_loop.display().row(1), "");
    assert_eq!(poll_loop.display().cursor(), (1, 0));

    assert_eq!(tick(&mut poll_loop, 1000), TickOutcome::Reverted);
    assert_eq!(poll_loop.display().row(0), "Waiting for IR");
    assert_eq!(poll_loop.display().row(1), "");
    assert_eq!(poll_loop.state(), LoopState::Idle);
}

#[test]
fn hold_lasts_until_deadline_without_polling() {
    let mut poll_loop = started([DecodeResult::Value(0x45), DecodeResult::Value(0x46)]);

    assert_eq!(tick(&mut poll_loop, 5), TickOutcome::Shown(0x45));
    assert_eq!(
        poll_loop.state(),
        LoopState::Showing {
            code: 0x45,
            until: Instant::from_millis(1005),
        }
    );
    let polls_after_show = poll_loop.receiver().polls;

    for millis in [6, 500, 1004] {
        assert_eq!(tick(&mut poll_loop, millis), TickOutcome::Holding);
    }
    assert_eq!(poll_loop.receiver().polls, polls_after_show);
    assert_eq!(poll_loop.display().row(0), "IR Code:");

    assert_eq!(tick(&mut poll_loop, 1005), TickOutcome::Reverted);
    assert_eq!(poll_loop.receiver().polls, polls_after_show);
}

#[test]
fn resume_is_called_once_per_decode_before_the_next_one() {
    let mut poll_loop = started([DecodeResult::Value(0x45), DecodeResult::Value(0x46)]);

    assert_eq!(tick(&mut poll_loop, 0), TickOutcome::Shown(0x45));
    assert_eq!(poll_loop.receiver().resumes, 1);

    assert_eq!(tick(&mut poll_loop, 1000), TickOutcome::Reverted);
    assert_eq!(poll_loop.receiver().resumes, 1);

    assert_eq!(tick(&mut poll_loop, 1010), TickOutcome::Shown(0x46));
    assert_eq!(poll_loop.receiver().resumes, 2);
    assert_eq!(
        poll_loop.log().lines,
        ["Received IR code: 0x45", "Received IR code: 0x46"]
    );
}

#[test]
fn repeat_sentinel_is_logged_like_any_code() {
    let repeat = DecodeResult::Value(0xFFFF_FFFF);
    assert!(repeat.is_repeat());
    let mut poll_loop = started([repeat]);
    assert_eq!(tick(&mut poll_loop, 0), TickOutcome::Shown(0xFFFF_FFFF));
    assert_eq!(poll_loop.log().lines, ["Received IR code: 0xFFFFFFFF"]);
}

#[test]
fn code_on_display_when_enabled() {
    let config = PollLoopConfig::default().with_code_on_display(true);
    let mut poll_loop = started_with([DecodeResult::Value(0x00FF_30CF)], config);

    assert_eq!(tick(&mut poll_loop, 0), TickOutcome::Shown(0x00FF_30CF));
    assert_eq!(poll_loop.display().row(0), "IR Code:");
    assert_eq!(poll_loop.display().row(1), "0xFF30CF");
}

#[test]
fn custom_hold_and_idle_text() {
    let config = PollLoopConfig::default()
        .with_hold(Duration::from_millis(250))
        .with_idle_text("Waiting for IR!");
    let mut poll_loop = started_with([DecodeResult::Value(7)], config);
    assert_eq!(poll_loop.config().hold, Duration::from_millis(250));

    assert_eq!(tick(&mut poll_loop, 100), TickOutcome::Shown(7));
    assert_eq!(tick(&mut poll_loop, 349), TickOutcome::Holding);
    assert_eq!(tick(&mut poll_loop, 350), TickOutcome::Reverted);
    assert_eq!(poll_loop.display().row(0), "Waiting for IR!");
}

#[test]
fn into_parts_returns_peripherals() {
    let mut poll_loop = started([DecodeResult::Value(1)]);
    tick(&mut poll_loop, 0);
    let (receiver, lcd, log) = poll_loop.into_parts();
    assert_eq!(receiver.resumes, 1);
    assert_eq!(lcd.row(0), "IR Code:");
    assert_eq!(log.lines.len(), 1);
}
