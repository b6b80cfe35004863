use bevy::prelude::*;

use crate::gameplay::sync_scene;

const HUD_TEXT_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);
const TIMER_TEXT_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

/// Values shown by the HUD. Text is only rebuilt when one of them changed.
#[derive(Resource, Default)]
pub struct HudUI {
    score: u32,
    high_score: u32,
    remaining_secs: u32,
    instructions: &'static str,
    is_dirty: bool,
}

impl HudUI {
    /// Starts with a full countdown on display.
    pub fn new(instructions: &'static str, countdown_secs: u32) -> Self {
        Self {
            instructions,
            remaining_secs: countdown_secs,
            is_dirty: true,
            ..default()
        }
    }

    pub fn update(&mut self, score: u32, high_score: u32, remaining_secs: u32) {
        if (self.score, self.high_score, self.remaining_secs) == (score, high_score, remaining_secs)
        {
            return;
        }
        self.score = score;
        self.high_score = high_score;
        self.remaining_secs = remaining_secs;
        self.is_dirty = true;
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn high_score_text(&self) -> String {
        format!("High Score: {}", self.high_score)
    }

    pub fn time_text(&self) -> String {
        format!("Time: {}s", self.remaining_secs)
    }

    pub const fn is_dirty(&self) -> bool {
        self.is_dirty
    }
}

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct HighScoreText;

#[derive(Component)]
struct TimeText;

pub struct UIPlugin {
    pub instructions: &'static str,
    pub countdown_secs: u32,
}

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HudUI::new(self.instructions, self.countdown_secs))
            .add_systems(Startup, setup)
            .add_systems(Update, update_hud.after(sync_scene));
    }
}

fn hud_line(top: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        top: Val::Px(top),
        left: Val::Px(20.0),
        ..default()
    }
}

fn setup(mut commands: Commands, hud: Res<HudUI>) {
    let font = TextFont {
        font_size: 24.0,
        ..default()
    };

    commands.spawn((
        Text::new(hud.score_text()),
        font.clone(),
        TextColor(HUD_TEXT_COLOR),
        hud_line(40.0),
        ScoreText,
    ));
    commands.spawn((
        Text::new(hud.high_score_text()),
        font.clone(),
        TextColor(HUD_TEXT_COLOR),
        hud_line(80.0),
        HighScoreText,
    ));
    commands.spawn((
        Text::new(hud.time_text()),
        font,
        TextColor(TIMER_TEXT_COLOR),
        hud_line(120.0),
        TimeText,
    ));

    // Instructions
    commands.spawn((
        Text::new(hud.instructions),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(HUD_TEXT_COLOR),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(40.0),
            width: Val::Percent(100.0),
            padding: UiRect::horizontal(Val::Px(20.0)),
            justify_content: JustifyContent::Center,
            ..default()
        },
    ));
}

fn update_hud(
    mut hud: ResMut<HudUI>,
    mut score: Query<&mut Text, (With<ScoreText>, Without<HighScoreText>, Without<TimeText>)>,
    mut high_score: Query<&mut Text, (With<HighScoreText>, Without<ScoreText>, Without<TimeText>)>,
    mut time: Query<&mut Text, (With<TimeText>, Without<ScoreText>, Without<HighScoreText>)>,
) {
    if !hud.is_dirty {
        return;
    }
    for mut text in &mut score {
        **text = hud.score_text();
    }
    for mut text in &mut high_score {
        **text = hud.high_score_text();
    }
    for mut text in &mut time {
        **text = hud.time_text();
    }
    hud.is_dirty = false;
}

#[cfg(test)]
#[expect(
    clippy::missing_assert_message,
    reason = "assert_eq output already shows both sides"
)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_values_do_not_dirty_the_hud() {
        let mut hud = HudUI::new("drag", 10);
        assert_eq!(hud.time_text(), "Time: 10s");
        hud.is_dirty = false;

        hud.update(0, 0, 10);
        assert!(!hud.is_dirty());

        hud.update(1, 1, 10);
        assert!(hud.is_dirty());
        assert_eq!(hud.score_text(), "Score: 1");
        assert_eq!(hud.high_score_text(), "High Score: 1");
        assert_eq!(hud.time_text(), "Time: 10s");
    }
}
