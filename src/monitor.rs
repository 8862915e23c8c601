use std::f64::consts::PI;

use uuid::Uuid;

use crate::colors;
use crate::config::{Config, MAX_LIGHT_LEVEL};
use crate::lang::{MessageKey, Messages};
use crate::toggle::DisplayToggles;

/// Integer block coordinates of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block containing the point, so `-0.5` lands in block `-1`.
    pub fn containing(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: x.floor() as i32,
            y: y.floor() as i32,
            z: z.floor() as i32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnVerdict {
    CanSpawn,
    CannotSpawn,
}

impl SpawnVerdict {
    pub fn from_light(level: u8, threshold: u8) -> Self {
        if level <= threshold {
            Self::CanSpawn
        } else {
            Self::CannotSpawn
        }
    }

    pub fn message_key(self) -> MessageKey {
        match self {
            Self::CanSpawn => MessageKey::MonsterCanSpawn,
            Self::CannotSpawn => MessageKey::MonsterCannotSpawn,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    ActionBar,
    Chat,
}

/// A light level message ready for delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub channel: Channel,
    /// Template with the level filled in and colour codes translated.
    pub text: String,
}

/// A player movement as seen by the light check.
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    pub player: Uuid,
    pub from: BlockCoord,
    pub to: Option<BlockCoord>,
    pub cancelled: bool,
}

/// Returns the block whose light should be reported, or `None` when the
/// move needs no message.
pub fn destination(toggles: &DisplayToggles, movement: &Movement) -> Option<BlockCoord> {
    if movement.cancelled || !toggles.is_enabled(movement.player) {
        return None;
    }
    movement.to.filter(|to| *to != movement.from)
}

/// Light level of a block: the brighter of block light and the sky light
/// left after the world's current darkening.
pub fn combined_light(block: u8, sky: u8, sky_darken: u8) -> u8 {
    block.max(sky.saturating_sub(sky_darken)).min(MAX_LIGHT_LEVEL)
}

/// Amount subtracted from sky light for the time of day and weather, 0..=11.
///
/// `time_of_day` is in ticks (0 is sunrise, 6000 noon, 18000 midnight),
/// `rain` and `thunder` are the world's 0.0..=1.0 weather gradients.
pub fn sky_darken(time_of_day: i64, rain: f32, thunder: f32) -> u8 {
    let angle = sky_angle(time_of_day);
    let mut light = 1.0 - ((angle * PI * 2.0).cos() * 2.0 + 0.5);
    light = 1.0 - light.clamp(0.0, 1.0);
    light *= 1.0 - f64::from(rain.clamp(0.0, 1.0)) * 5.0 / 16.0;
    light *= 1.0 - f64::from(thunder.clamp(0.0, 1.0)) * 5.0 / 16.0;
    ((1.0 - light) * 11.0) as u8
}

fn sky_angle(time_of_day: i64) -> f64 {
    let day = time_of_day.rem_euclid(24_000) as f64 / 24_000.0 - 0.25;
    let day = day - day.floor();
    let eased = 0.5 - (day * PI).cos() / 2.0;
    (day * 2.0 + eased) / 3.0
}

pub fn notice(config: &Config, messages: &Messages, level: u8) -> Notice {
    let level = level.min(MAX_LIGHT_LEVEL);
    let verdict = SpawnVerdict::from_light(level, config.spawn_threshold());
    let template = messages.get(verdict.message_key());
    let channel = if config.display_in_actionbar {
        Channel::ActionBar
    } else {
        Channel::Chat
    };
    Notice {
        channel,
        text: colors::translate(&fill_level(template, level)),
    }
}

/// Fills `%s`, `%d` and `{LEVEL}` with the level. `%%` is a literal `%`.
pub fn fill_level(template: &str, level: u8) -> String {
    let level = level.to_string();
    template
        .split("%%")
        .map(|part| {
            part.replace("%s", &level)
                .replace("%d", &level)
                .replace("{LEVEL}", &level)
        })
        .collect::<Vec<_>>()
        .join("%")
}
