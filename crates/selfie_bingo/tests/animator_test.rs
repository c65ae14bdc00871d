//! Tests for celebration sequencing under paused time.

use selfie_bingo::{
    AnimationTiming, AnimatorState, Celebration, CelebrationAnimator, CelebrationSurface,
    Completion, Direction, OverlayArtifact, Position, SlideIn, VisualState,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Visual(Position, VisualState),
    Show(OverlayArtifact),
    Hide,
}

/// Surface recording every call with the (paused) time it arrived.
#[derive(Debug, Default)]
struct RecordingSurface {
    calls: Mutex<Vec<(Instant, Call)>>,
    fail_visuals: bool,
}

impl RecordingSurface {
    fn failing() -> Self {
        Self {
            fail_visuals: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(Instant, Call)> {
        self.calls.lock().expect("lock").clone()
    }

    fn visuals(&self, state: VisualState) -> Vec<(Instant, Position)> {
        self.calls()
            .into_iter()
            .filter_map(|(at, call)| match call {
                Call::Visual(pos, s) if s == state => Some((at, pos)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock").push((Instant::now(), call));
    }
}

#[async_trait::async_trait]
impl CelebrationSurface for RecordingSurface {
    async fn apply_visual_state(
        &self,
        position: Position,
        state: VisualState,
    ) -> anyhow::Result<()> {
        if self.fail_visuals {
            anyhow::bail!("tile {} is gone", position.number());
        }
        self.record(Call::Visual(position, state));
        Ok(())
    }

    async fn show_overlay(&self, overlay: OverlayArtifact, _slide: SlideIn) -> anyhow::Result<()> {
        self.record(Call::Show(overlay));
        Ok(())
    }

    async fn hide_overlay(&self) -> anyhow::Result<()> {
        self.record(Call::Hide);
        Ok(())
    }
}

fn animator() -> (Arc<RecordingSurface>, Arc<CelebrationAnimator>) {
    let surface = Arc::new(RecordingSurface::default());
    let animator = Arc::new(CelebrationAnimator::new(
        surface.clone(),
        AnimationTiming::default(),
    ));
    (surface, animator)
}

const CORNERS: [Position; 4] = [
    Position::TopLeft,
    Position::TopRight,
    Position::BottomLeft,
    Position::BottomRight,
];

#[tokio::test(start_paused = true)]
async fn test_corner_flips_forward_then_unflips_reverse() {
    let (surface, animator) = animator();
    let celebration = Celebration::for_completion(&Completion::Corner);

    let report = animator
        .celebrate(&celebration, || {})
        .await
        .expect("Celebration failed");

    let flips: Vec<Position> = surface.visuals(VisualState::Flip).into_iter().map(|(_, p)| p).collect();
    let unflips: Vec<Position> = surface
        .visuals(VisualState::Unflip)
        .into_iter()
        .map(|(_, p)| p)
        .collect();
    assert_eq!(flips, CORNERS.to_vec());
    let mut reversed = CORNERS.to_vec();
    reversed.reverse();
    assert_eq!(unflips, reversed);
    assert_eq!(report.flipped(), &CORNERS.to_vec());
    assert_eq!(report.unflipped(), &reversed);
    assert_eq!(report.overlay(), &OverlayArtifact::Corner);
}

#[tokio::test(start_paused = true)]
async fn test_flips_are_staggered() {
    let (surface, animator) = animator();
    let celebration = Celebration::for_completion(&Completion::Row(1));
    animator
        .celebrate(&celebration, || {})
        .await
        .expect("Celebration failed");

    for state in [VisualState::Flip, VisualState::Unflip] {
        let times: Vec<Instant> = surface.visuals(state).into_iter().map(|(t, _)| t).collect();
        assert_eq!(times.len(), 3);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(350));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_overlay_follows_last_flip() {
    let (surface, animator) = animator();
    let celebration = Celebration::for_completion(&Completion::Column(0));
    animator
        .celebrate(&celebration, || {})
        .await
        .expect("Celebration failed");

    let calls = surface.calls();
    let show_at = calls
        .iter()
        .position(|(_, c)| *c == Call::Show(OverlayArtifact::Line))
        .expect("Overlay shown");
    let last_flip = calls
        .iter()
        .rposition(|(_, c)| matches!(c, Call::Visual(_, VisualState::Flip)))
        .expect("Flips applied");
    assert!(show_at > last_flip);
    assert!(calls[show_at].0 - calls[last_flip].0 >= Duration::from_millis(350));
}

#[tokio::test(start_paused = true)]
async fn test_on_revealed_runs_after_slide() {
    let (surface, animator) = animator();
    let celebration = Celebration::for_completion(&Completion::Corner);
    let revealed_at = Arc::new(Mutex::new(None));
    let slot = revealed_at.clone();

    animator
        .celebrate(&celebration, move || {
            *slot.lock().expect("lock") = Some(Instant::now());
        })
        .await
        .expect("Celebration failed");

    let revealed = revealed_at.lock().expect("lock").expect("Callback ran");
    let shown = surface
        .calls()
        .into_iter()
        .find_map(|(at, c)| matches!(c, Call::Show(_)).then_some(at))
        .expect("Overlay shown");
    assert!(revealed - shown >= Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_state_transitions() {
    let (_surface, animator) = animator();
    assert_eq!(animator.state(), AnimatorState::Idle);

    let running = animator.clone();
    let handle = tokio::spawn(async move {
        let celebration = Celebration::for_completion(&Completion::Corner);
        running.celebrate(&celebration, || {}).await
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(animator.state(), AnimatorState::Animating(Direction::Forward));

    // Forward pass ends at 1400ms; the slide runs until 3400ms.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(animator.state(), AnimatorState::Revealing);

    handle
        .await
        .expect("Task panicked")
        .expect("Celebration failed");
    assert_eq!(animator.state(), AnimatorState::Showing);
    assert!(animator.flipped().is_empty());

    let cleaned = animator.dismiss().await.expect("Dismiss failed");
    assert!(!cleaned);
    assert_eq!(animator.state(), AnimatorState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_full_house_stays_flipped_until_dismissed() {
    let (surface, animator) = animator();
    let celebration = Celebration::for_completion(&Completion::FullHouse);

    let report = animator
        .celebrate(&celebration, || {})
        .await
        .expect("Celebration failed");
    assert_eq!(report.flipped().len(), 9);
    assert!(report.unflipped().is_empty());
    assert_eq!(animator.flipped(), Position::ALL.to_vec());
    assert!(surface.visuals(VisualState::Unflip).is_empty());

    let cleaned = animator.dismiss().await.expect("Dismiss failed");
    assert!(cleaned);
    assert!(animator.flipped().is_empty());
    assert_eq!(surface.visuals(VisualState::Unflip).len(), 9);
    assert!(surface.calls().iter().any(|(_, c)| *c == Call::Hide));
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_celebrations_run_in_order() {
    let (surface, animator) = animator();
    let row = Celebration::for_completion(&Completion::Row(0));
    let column = Celebration::for_completion(&Completion::Column(2));

    let (first, second) = tokio::join!(
        animator.celebrate(&row, || {}),
        animator.celebrate(&column, || {})
    );
    first.expect("First celebration failed");
    second.expect("Second celebration failed");

    let calls = surface.calls();
    let last_of_first = calls
        .iter()
        .rposition(|(_, c)| *c == Call::Visual(Position::TopLeft, VisualState::Unflip))
        .expect("Row unflipped");
    let first_of_second = calls
        .iter()
        .position(|(_, c)| *c == Call::Visual(Position::MiddleRight, VisualState::Flip))
        .expect("Column flipped");
    assert!(first_of_second > last_of_first);
}

#[tokio::test(start_paused = true)]
async fn test_surface_failure_is_reported() {
    let surface = Arc::new(RecordingSurface::failing());
    let animator = CelebrationAnimator::new(surface, AnimationTiming::default());
    let celebration = Celebration::for_completion(&Completion::Row(2));

    let err = animator
        .celebrate(&celebration, || panic!("should not reveal"))
        .await
        .expect_err("Surface failure should surface");
    assert!(err.message.contains("tile 7 is gone"));
    assert_eq!(animator.state(), AnimatorState::Idle);
}
