use iced::Subscription;
use std::time::Duration;

use moodvie_core::config::ThemeMode;

use crate::app::Message;

/// Roughly one frame at 60 Hz.
const FRAME: Duration = Duration::from_millis(16);
const APPEARANCE_POLL: Duration = Duration::from_secs(5);

/// Frame ticks for the star fill, only while it is running.
pub fn animation_tick(animating: bool) -> Subscription<Message> {
    if animating {
        iced::time::every(FRAME).map(Message::AnimationTick)
    } else {
        Subscription::none()
    }
}

/// Re-detect the OS appearance periodically when following the system.
pub fn appearance_poll(mode: ThemeMode) -> Subscription<Message> {
    match mode {
        ThemeMode::System => iced::time::every(APPEARANCE_POLL).map(|_| Message::AppearanceTick),
        _ => Subscription::none(),
    }
}

pub fn subscriptions(animating: bool, mode: ThemeMode) -> Subscription<Message> {
    Subscription::batch([animation_tick(animating), appearance_poll(mode)])
}
