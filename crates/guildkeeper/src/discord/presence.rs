use std::time::Duration;

use poise::serenity_prelude as serenity;
use rand::seq::SliceRandom;
use serenity::ActivityData;
use tracing::debug;

pub const ROTATION_PERIOD: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivityKind {
    Watching,
    Listening,
    Playing,
    Competing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Activity {
    kind: ActivityKind,
    name: &'static str,
}

const ACTIVITIES: [Activity; 5] = [
    Activity {
        kind: ActivityKind::Watching,
        name: "заявки на стафф",
    },
    Activity {
        kind: ActivityKind::Watching,
        name: "за порядком на сервере",
    },
    Activity {
        kind: ActivityKind::Listening,
        name: "новых участников",
    },
    Activity {
        kind: ActivityKind::Playing,
        name: "систему ролей",
    },
    Activity {
        kind: ActivityKind::Competing,
        name: "администрацию сервера",
    },
];

impl Activity {
    fn data(self) -> ActivityData {
        match self.kind {
            ActivityKind::Watching => ActivityData::watching(self.name),
            ActivityKind::Listening => ActivityData::listening(self.name),
            ActivityKind::Playing => ActivityData::playing(self.name),
            ActivityKind::Competing => ActivityData::competing(self.name),
        }
    }
}

fn pick() -> Activity {
    ACTIVITIES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(ACTIVITIES[0])
}

/// Sets a random activity now and again every [`ROTATION_PERIOD`].
pub fn spawn_rotation(ctx: serenity::Context) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ROTATION_PERIOD);
        loop {
            ticker.tick().await;
            let activity = pick();
            debug!(activity = activity.name, "presence rotated");
            ctx.set_activity(Some(activity.data()));
        }
    })
}
