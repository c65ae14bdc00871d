//! Bingo session: the explicit context tying the board to its collaborators.

use crate::animator::{
    AnimationError, Celebration, CelebrationAnimator, CelebrationSurface, OverlayArtifact,
};
use crate::board_model::BoardModel;
use crate::caption::share_caption;
use crate::capture::{CaptureError, PhotoCapture};
use crate::compositor::GridCompositor;
use crate::config::BingoConfig;
use crate::dialog::Dialogs;
use crate::share::ShareTarget;
use crate::store::{StoreError, TileStore};
use derive_new::new;
use selfie_bingo_board::{Board, Completion, Position};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const NAME_PROMPT: &str = "Enter the name of the person you want to meet: ";
const NAME_TITLE: &str = "Name a face";
const EARLY_SHARE_PROMPT: &str = "Are you sure you don't want to get a full house before sharing?";

/// Notifications for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BingoEvent {
    /// A tile was given a name.
    TileNamed {
        /// Tile that was named.
        position: Position,
        /// New name.
        name: String,
    },
    /// A tile received a photo.
    TileFilled(Position),
    /// A photo completed a win condition.
    Completed {
        /// Tile whose photo completed it.
        position: Position,
        /// Condition announced.
        completion: Completion,
    },
    /// A celebration overlay finished sliding in.
    OverlayRevealed(OverlayArtifact),
    /// The composed image was handed to the share target.
    Shared {
        /// Caption sent with the image.
        caption: String,
    },
    /// The share target reported a failure.
    ShareFailed {
        /// Failure detail.
        reason: String,
    },
}

/// Result of a photo attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOutcome {
    /// Photo stored; carries the condition it completed, if any.
    Stored(Option<Completion>),
    /// The user cancelled; nothing changed.
    Ignored,
    /// Capture failed and the user was alerted; nothing changed.
    Failed,
}

/// Result of tapping a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tile had no name, so one was asked for.
    Named(Option<String>),
    /// The tile was named, so a photo was taken.
    Photo(PhotoOutcome),
}

/// Result of a share request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The image reached the share target.
    Shared,
    /// The user chose to wait for a full house.
    Declined,
    /// Composition failed and the user was alerted.
    ComposeFailed,
    /// The share target failed; logged only.
    ShareFailed,
}

/// Host-provided collaborators.
#[derive(Clone, new)]
pub struct Collaborators {
    /// Alert/prompt/confirm dialogs.
    pub dialogs: Arc<dyn Dialogs>,
    /// Photo source.
    pub capture: Arc<dyn PhotoCapture>,
    /// Share/export sink.
    pub share: Arc<dyn ShareTarget>,
}

/// One player's bingo game.
///
/// Every operation takes the target tile explicitly; there is no ambient
/// "current tile" state.
pub struct BingoSession {
    board: BoardModel,
    animator: CelebrationAnimator,
    compositor: GridCompositor,
    collaborators: Collaborators,
    hashtag: String,
    events: Option<mpsc::UnboundedSender<BingoEvent>>,
}

impl std::fmt::Debug for BingoSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BingoSession")
            .field("board", &self.board)
            .field("animator", &self.animator)
            .field("compositor", &self.compositor)
            .field("hashtag", &self.hashtag)
            .finish_non_exhaustive()
    }
}

impl BingoSession {
    /// Creates a session from configuration.
    #[instrument(skip_all)]
    pub fn new(
        store: Arc<dyn TileStore>,
        surface: Arc<dyn CelebrationSurface>,
        collaborators: Collaborators,
        config: &BingoConfig,
    ) -> Self {
        info!(hashtag = %config.hashtag(), "Creating bingo session");
        Self {
            board: BoardModel::new(store),
            animator: CelebrationAnimator::new(surface, config.animation_timing()),
            compositor: GridCompositor::with_data_urls(config.compositor_settings()),
            collaborators,
            hashtag: config.hashtag().clone(),
            events: None,
        }
    }

    /// Replaces the compositor (for example to use a custom image loader).
    pub fn with_compositor(mut self, compositor: GridCompositor) -> Self {
        self.compositor = compositor;
        self
    }

    /// Sends [`BingoEvent`]s to `tx`.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<BingoEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// The store-backed board view.
    pub fn board_model(&self) -> &BoardModel {
        &self.board
    }

    /// The celebration animator.
    pub fn animator(&self) -> &CelebrationAnimator {
        &self.animator
    }

    /// Current board snapshot.
    pub fn board(&self) -> Result<Board, StoreError> {
        self.board.get_all()
    }

    fn emit(&self, event: BingoEvent) {
        if let Some(tx) = &self.events
            && tx.send(event).is_err()
        {
            debug!("Event receiver dropped");
        }
    }

    /// Handles a tap: unnamed tiles ask for a name, named tiles take a photo.
    #[instrument(skip(self))]
    pub async fn tap(&self, pos: Position) -> Result<TapOutcome, StoreError> {
        if self.board.tile(pos)?.is_named() {
            Ok(TapOutcome::Photo(self.capture_photo(pos).await?))
        } else {
            Ok(TapOutcome::Named(self.name_tile(pos).await?))
        }
    }

    /// Prompts for a tile name, prefilled with the current one.
    ///
    /// Returns the stored name, or `None` if the prompt was dismissed.
    #[instrument(skip(self))]
    pub async fn name_tile(&self, pos: Position) -> Result<Option<String>, StoreError> {
        let current = self.board.tile(pos)?.name().clone().unwrap_or_default();
        let answer = self
            .collaborators
            .dialogs
            .prompt(NAME_PROMPT, NAME_TITLE, &current)
            .await;

        let Some(name) = answer else {
            debug!("Name prompt dismissed");
            return Ok(None);
        };
        self.set_name(pos, &name)?;
        Ok(Some(name))
    }

    /// Stores a tile name without prompting.
    #[instrument(skip(self))]
    pub fn set_name(&self, pos: Position, name: &str) -> Result<(), StoreError> {
        self.board.set_name(pos, name)?;
        self.emit(BingoEvent::TileNamed {
            position: pos,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Takes a photo for a tile and runs completion handling.
    ///
    /// Cancellations are ignored silently; other capture failures are
    /// alerted. The tile keeps its previous image in both cases.
    #[instrument(skip(self))]
    pub async fn capture_photo(&self, pos: Position) -> Result<PhotoOutcome, StoreError> {
        match self.collaborators.capture.capture(pos).await {
            Ok(photo) => {
                let completion = self.store_photo(pos, photo.data_url()).await?;
                Ok(PhotoOutcome::Stored(completion))
            }
            Err(err) if err.is_user_cancel() => {
                debug!(reason = %err, "Capture cancelled");
                Ok(PhotoOutcome::Ignored)
            }
            Err(CaptureError::Unavailable) => {
                warn!("No camera available");
                self.collaborators
                    .dialogs
                    .alert("Sorry, you need a camera to use Selfie Bingo!", "Oops!")
                    .await;
                Ok(PhotoOutcome::Failed)
            }
            Err(err) => {
                warn!(error = %err, "Capture failed");
                self.collaborators
                    .dialogs
                    .alert(&format!("Couldn't take a picture because: {}", err), "Oops!")
                    .await;
                Ok(PhotoOutcome::Failed)
            }
        }
    }

    /// Persists an image handle and runs completion handling.
    #[instrument(skip(self, image), fields(len = image.len()))]
    pub async fn store_photo(
        &self,
        pos: Position,
        image: &str,
    ) -> Result<Option<Completion>, StoreError> {
        self.board.set_image(pos, image)?;
        self.emit(BingoEvent::TileFilled(pos));
        self.image_updated(pos).await
    }

    /// Detects and celebrates whatever the new image at `pos` completed.
    ///
    /// A full house celebrates all nine tiles and then composes and shares
    /// the grid.
    #[instrument(skip(self))]
    pub async fn image_updated(&self, pos: Position) -> Result<Option<Completion>, StoreError> {
        let Some(completion) = self.board.detect(pos)? else {
            debug!("No completion");
            return Ok(None);
        };
        info!(%completion, tile = pos.number(), "Win condition completed");
        self.emit(BingoEvent::Completed {
            position: pos,
            completion,
        });

        if let Err(e) = self.celebrate(&completion).await {
            warn!(error = %e, "Celebration failed");
        }

        if completion == Completion::FullHouse {
            self.compose_and_share().await?;
        }
        Ok(Some(completion))
    }

    async fn celebrate(&self, completion: &Completion) -> Result<(), AnimationError> {
        let celebration = Celebration::for_completion(completion);
        let events = self.events.clone();
        let overlay = *celebration.overlay();
        self.animator
            .celebrate(&celebration, move || {
                if let Some(tx) = events {
                    let _ = tx.send(BingoEvent::OverlayRevealed(overlay));
                }
            })
            .await?;
        Ok(())
    }

    /// Dismisses the celebration overlay.
    #[instrument(skip(self))]
    pub async fn dismiss_overlay(&self) -> Result<(), AnimationError> {
        self.animator.dismiss().await?;
        Ok(())
    }

    /// Shares the board, asking first when it is not a full house yet.
    #[instrument(skip(self))]
    pub async fn share(&self) -> Result<ShareOutcome, StoreError> {
        let completed = self.board.get_completed()?.len();
        if completed < 9 {
            let go_ahead = self
                .collaborators
                .dialogs
                .confirm(
                    EARLY_SHARE_PROMPT,
                    "Share your image",
                    "Share anyway",
                    "Ok, I'll wait",
                )
                .await;
            if !go_ahead {
                info!(completed, "Early share declined");
                return Ok(ShareOutcome::Declined);
            }
        }
        self.compose_and_share().await
    }

    /// Composes the grid and hands it to the share target.
    ///
    /// Composition failures are alerted and nothing is shared. Share
    /// failures are logged and not retried.
    #[instrument(skip(self))]
    pub async fn compose_and_share(&self) -> Result<ShareOutcome, StoreError> {
        let board = self.board.get_all()?;

        let image = match self.compositor.compose(&board).await {
            Ok(image) => image,
            Err(err) => {
                warn!(error = %err, "Composition failed");
                self.collaborators
                    .dialogs
                    .alert(&err.to_string(), "Error")
                    .await;
                return Ok(ShareOutcome::ComposeFailed);
            }
        };

        let caption = share_caption(board.names(), &self.hashtag);
        match self.collaborators.share.share(&caption, &image).await {
            Ok(()) => {
                info!(%caption, "Successfully shared image");
                self.emit(BingoEvent::Shared { caption });
                Ok(ShareOutcome::Shared)
            }
            Err(err) => {
                warn!(error = %err, "Some problem sharing");
                self.emit(BingoEvent::ShareFailed {
                    reason: err.to_string(),
                });
                Ok(ShareOutcome::ShareFailed)
            }
        }
    }

    /// Clears every tile.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), StoreError> {
        self.board.reset()
    }
}
