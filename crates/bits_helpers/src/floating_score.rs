use core::time::Duration;

use bevy::prelude::*;

const RISE: f32 = 50.0;

#[derive(Component)]
pub struct FloatingScore {
    timer: Timer,
    initial_position: Vec2,
    color: Srgba,
}

/// Spawns a short-lived label at `position` (world space) that rises and fades.
pub fn spawn_floating_score(commands: &mut Commands, position: Vec2, text: &str, color: Srgba) {
    commands.spawn((
        Text2d::new(text),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::Srgba(color)),
        Transform::from_translation(position.extend(10.0)),
        FloatingScore {
            timer: Timer::new(Duration::from_secs(1), TimerMode::Once),
            initial_position: position,
            color,
        },
    ));
}

pub fn animate_floating_scores(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut TextColor, &mut FloatingScore)>,
) {
    for (entity, mut transform, mut text_color, mut floating_score) in &mut query {
        floating_score.timer.tick(time.delta());
        let progress = floating_score.timer.fraction();

        // Move upwards and fade out
        transform.translation.y = RISE.mul_add(progress, floating_score.initial_position.y);
        text_color.0 = Color::Srgba(floating_score.color.with_alpha(1.0 - progress));

        if floating_score.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
