//! Canned wave narration for the headless driver.

use rogue_defence_core::FlavorText;

const BOSS_LINES: [&str; 3] = [
    "The ground trembles. Something enormous is marching on the gate.",
    "A war horn echoes across the valley. The warlord rides with this wave.",
    "Scouts report a giant among the horde. Hold the line.",
];

const WAVE_LINES: [&str; 5] = [
    "Goblin scouts test the outer defences.",
    "Torches flicker on the horizon as the horde regroups.",
    "Drums beat in the distance. They are coming faster now.",
    "A ragged column of raiders winds along the old road.",
    "The wind carries the stench of the swamp. Another wave approaches.",
];

/// Chooses a line from fixed tables, reserving the boss lines for every
/// fifth wave.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CannedFlavor;

impl FlavorText for CannedFlavor {
    fn flavor_text(&self, wave: u32) -> String {
        let index = wave as usize;
        let line = if wave > 0 && wave % 5 == 0 {
            BOSS_LINES[(index / 5 - 1) % BOSS_LINES.len()]
        } else {
            WAVE_LINES[index % WAVE_LINES.len()]
        };
        format!("Wave {wave}: {line}")
    }
}
