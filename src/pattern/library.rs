//! Built-in patterns, one per [`Mode`](crate::mode::Mode)

use super::{Pattern, Repeat, Stage};
use crate::color::{BLUE, GREEN, PURPLE, RED, TRACKING, WHITE, YELLOW};

const DIM: u8 = 128;
const FULL: u8 = 255;

static NONE_STAGES: [Stage; 1] = [Stage::off(0, 0)];
pub static NONE: Pattern = Pattern::new(&NONE_STAGES, Repeat::NONE);

static WAIT_CONNECT_STAGES: [Stage; 2] = [Stage::new(DIM, RED, 100, 0), Stage::off(1500, 0)];
pub static WAIT_CONNECT: Pattern = Pattern::new(&WAIT_CONNECT_STAGES, Repeat::Forever);

// Slow white fade-in followed by three short flashes
static BOOT_STAGES: [Stage; 8] = [
    Stage::new(FULL, WHITE, 3000, 3000),
    Stage::off(500, 150),
    Stage::new(FULL, WHITE, 50, 0),
    Stage::off(50, 0),
    Stage::new(FULL, WHITE, 50, 0),
    Stage::off(50, 0),
    Stage::new(FULL, WHITE, 50, 0),
    Stage::off(200, 0),
];
pub static BOOT: Pattern = Pattern::new(&BOOT_STAGES, Repeat::Times(1));

static REVERSING_STAGES: [Stage; 6] = [
    Stage::new(FULL, GREEN, 50, 0),
    Stage::off(100, 0),
    Stage::new(FULL, GREEN, 50, 0),
    Stage::off(100, 0),
    Stage::new(FULL, GREEN, 50, 0),
    Stage::off(100, 0),
];
pub static REVERSING: Pattern = Pattern::new(&REVERSING_STAGES, Repeat::Times(1));

static TRACKING_STAGES: [Stage; 2] = [Stage::new(FULL, TRACKING, 500, 250), Stage::off(5000, 0)];
pub static TRACKING_PATTERN: Pattern =
    Pattern::new(&TRACKING_STAGES, Repeat::Forever).with_gradual(FULL);

static SMART_CONFIG_STAGES: [Stage; 2] = [Stage::new(DIM, BLUE, 100, 0), Stage::off(1500, 0)];
pub static SMART_CONFIG: Pattern = Pattern::new(&SMART_CONFIG_STAGES, Repeat::Forever);

static WAIT_SERVER_STAGES: [Stage; 2] = [Stage::new(DIM, YELLOW, 100, 0), Stage::off(1500, 0)];
pub static WAIT_SERVER: Pattern = Pattern::new(&WAIT_SERVER_STAGES, Repeat::Forever);

static SETED_STAGES: [Stage; 1] = [Stage::new(FULL, PURPLE, 75, 0)];
pub static SETED: Pattern = Pattern::new(&SETED_STAGES, Repeat::Times(1));

static CAL_STEP_STAGES: [Stage; 1] = [Stage::new(FULL, GREEN, 75, 0)];
pub static CAL_STEP: Pattern = Pattern::new(&CAL_STEP_STAGES, Repeat::Times(1));

// Five quick green flashes
static CAL_DONE_STAGES: [Stage; 10] = [
    Stage::new(FULL, GREEN, 40, 0),
    Stage::off(75, 0),
    Stage::new(FULL, GREEN, 40, 0),
    Stage::off(75, 0),
    Stage::new(FULL, GREEN, 40, 0),
    Stage::off(75, 0),
    Stage::new(FULL, GREEN, 40, 0),
    Stage::off(75, 0),
    Stage::new(FULL, GREEN, 40, 0),
    Stage::off(75, 0),
];
pub static CAL_DONE: Pattern = Pattern::new(&CAL_DONE_STAGES, Repeat::Times(1));
