//! Fixed catalog of encouragement messages sent once per session.

use alerts_domain::{NewNotification, Notice, NoticeSeverity, NotificationKind};
use rand::Rng;
use uuid::Uuid;

const MOTIVATIONAL_NOTICE_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotivationalMessage {
    pub title: &'static str,
    pub message: &'static str,
}

pub static CATALOG: [MotivationalMessage; 5] = [
    MotivationalMessage {
        title: "Keep it up! 💪",
        message: "Every rupee tracked is a step toward financial freedom. You're doing great!",
    },
    MotivationalMessage {
        title: "Smart money move! 🧠",
        message: "Tracking expenses regularly puts you ahead of 80% of people. Stay consistent!",
    },
    MotivationalMessage {
        title: "Financial hero! 🦸",
        message: "Small savings today lead to big achievements tomorrow. Keep tracking!",
    },
    MotivationalMessage {
        title: "You're on track! 🎯",
        message: "Consistency is the key to financial success. Check your budgets today!",
    },
    MotivationalMessage {
        title: "Money wisdom! 💡",
        message: "A budget tells your money where to go instead of wondering where it went.",
    },
];

/// Picks one catalog entry uniformly at random.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static MotivationalMessage {
    &CATALOG[rng.gen_range(0..CATALOG.len())]
}

impl MotivationalMessage {
    pub fn notice(&self) -> Notice {
        Notice {
            title: self.title.to_string(),
            description: self.message.to_string(),
            severity: NoticeSeverity::Info,
            duration_ms: MOTIVATIONAL_NOTICE_MS,
        }
    }

    pub fn notification(&self, user_id: Uuid) -> NewNotification {
        NewNotification {
            user_id,
            kind: NotificationKind::Motivational,
            title: self.title.to_string(),
            message: self.message.to_string(),
            category: None,
        }
    }
}
