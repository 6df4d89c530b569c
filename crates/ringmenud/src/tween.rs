use crate::events::AppEvent;
use async_channel::Sender;
use parking_lot::RwLock;
use ringmenu::{AnimationRequest, Animator, ElementRef, MenuHandle, Point};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub const FRAME: Duration = Duration::from_millis(16);

/// Animator with the extra bookkeeping a host needs around attach and detach.
pub trait Stage: Animator {
    /// Puts an element somewhere without animating it.
    fn place(&mut self, element: ElementRef, at: Point);
    /// Drops every element of a detached menu.
    fn release(&mut self, menu: MenuHandle);
}

/// Starts slow, speeds up, ends slow.
pub fn swing(progress: f64) -> f64 {
    0.5 - (progress * PI).cos() / 2.0
}

fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

#[derive(Debug, Clone, Copy)]
struct Track {
    position: Point,
    generation: u64,
}

type Tracks = Arc<RwLock<HashMap<ElementRef, Track>>>;

/// Interpolates item offsets on tokio tasks, one task per request.
///
/// A newer request for the same element takes the element over; the older
/// task stops moving it but still reports its completion.
#[derive(Clone)]
pub struct TweenEngine {
    tracks: Tracks,
    tx: Sender<AppEvent>,
}

impl TweenEngine {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self {
            tracks: Arc::new(RwLock::new(HashMap::new())),
            tx,
        }
    }

    pub fn position(&self, element: ElementRef) -> Point {
        self.tracks
            .read()
            .get(&element)
            .map(|t| t.position)
            .unwrap_or_default()
    }

    fn begin(&self, element: ElementRef) -> (Point, u64) {
        let mut tracks = self.tracks.write();
        let track = tracks.entry(element).or_insert(Track {
            position: Point::ORIGIN,
            generation: 0,
        });
        track.generation += 1;
        (track.position, track.generation)
    }
}

impl Animator for TweenEngine {
    fn animate(&mut self, request: AnimationRequest) {
        let (from, generation) = self.begin(request.element);
        tokio::spawn(run_tween(
            self.tracks.clone(),
            request,
            from,
            generation,
            self.tx.clone(),
        ));
    }
}

impl Stage for TweenEngine {
    fn place(&mut self, element: ElementRef, at: Point) {
        let mut tracks = self.tracks.write();
        let track = tracks.entry(element).or_insert(Track {
            position: at,
            generation: 0,
        });
        track.position = at;
        track.generation += 1;
    }

    fn release(&mut self, menu: MenuHandle) {
        self.tracks.write().retain(|element, _| element.menu != menu);
    }
}

async fn run_tween(
    tracks: Tracks,
    request: AnimationRequest,
    from: Point,
    generation: u64,
    tx: Sender<AppEvent>,
) {
    let start = Instant::now();
    let mut ticker = tokio::time::interval(FRAME);

    loop {
        ticker.tick().await;
        let t = progress(start.elapsed(), request.duration);
        let position = if t >= 1.0 {
            request.to
        } else {
            from.lerp(request.to, swing(t))
        };

        let owned = {
            let mut tracks = tracks.write();
            match tracks.get_mut(&request.element) {
                Some(track) if track.generation == generation => {
                    track.position = position;
                    true
                }
                _ => false,
            }
        };

        if !owned || t >= 1.0 {
            break;
        }
    }

    if let Some(token) = request.on_complete
        && tx.send(AppEvent::AnimationDone(token)).await.is_err()
    {
        log::debug!("Event loop gone, dropping completion of {:?}", request.element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringmenu::CompletionToken;

    const EPSILON: f64 = 1e-9;

    fn element(item: usize) -> ElementRef {
        ElementRef::new(MenuHandle::from(1), item)
    }

    fn token(batch: u64) -> CompletionToken {
        CompletionToken {
            menu: MenuHandle::from(1),
            batch,
        }
    }

    async fn next_completion(rx: &async_channel::Receiver<AppEvent>) -> CompletionToken {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("no completion within 5s")
            .unwrap();
        match event {
            AppEvent::AnimationDone(token) => token,
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_swing_easing() {
        assert!(swing(0.0).abs() < EPSILON);
        assert!((swing(0.5) - 0.5).abs() < EPSILON);
        assert!((swing(1.0) - 1.0).abs() < EPSILON);
        assert!(swing(0.25) < 0.25);
        assert!(swing(0.75) > 0.75);
    }

    #[test]
    fn test_progress_clamps() {
        let d = Duration::from_millis(100);
        assert_eq!(progress(Duration::ZERO, d), 0.0);
        assert_eq!(progress(Duration::from_millis(50), d), 0.5);
        assert_eq!(progress(Duration::from_millis(500), d), 1.0);
        assert_eq!(progress(Duration::from_millis(3), Duration::ZERO), 1.0);
    }

    #[tokio::test]
    async fn test_animation_reaches_target_and_completes() {
        let (tx, rx) = async_channel::unbounded();
        let mut engine = TweenEngine::new(tx);
        engine.place(element(0), Point::new(10.0, 10.0));

        engine.animate(AnimationRequest {
            element: element(0),
            to: Point::new(110.0, -40.0),
            duration: Duration::from_millis(40),
            on_complete: Some(token(3)),
        });

        assert_eq!(next_completion(&rx).await, token(3));
        assert_eq!(engine.position(element(0)), Point::new(110.0, -40.0));
    }

    #[tokio::test]
    async fn test_parallel_requests_do_not_wait_on_each_other() {
        let (tx, rx) = async_channel::unbounded();
        let mut engine = TweenEngine::new(tx);

        engine.animate(AnimationRequest {
            element: element(0),
            to: Point::new(1.0, 1.0),
            duration: Duration::from_secs(2),
            on_complete: Some(token(0)),
        });
        engine.animate(AnimationRequest {
            element: element(1),
            to: Point::new(5.0, 5.0),
            duration: Duration::from_millis(20),
            on_complete: Some(token(1)),
        });

        assert_eq!(next_completion(&rx).await, token(1));
        assert_eq!(engine.position(element(1)), Point::new(5.0, 5.0));
    }

    #[tokio::test]
    async fn test_superseded_tween_still_reports() {
        let (tx, rx) = async_channel::unbounded();
        let mut engine = TweenEngine::new(tx);

        engine.animate(AnimationRequest {
            element: element(0),
            to: Point::new(500.0, 0.0),
            duration: Duration::from_secs(3),
            on_complete: Some(token(0)),
        });
        engine.animate(AnimationRequest {
            element: element(0),
            to: Point::new(0.0, 80.0),
            duration: Duration::from_millis(30),
            on_complete: Some(token(1)),
        });

        let mut seen = vec![next_completion(&rx).await, next_completion(&rx).await];
        seen.sort_by_key(|t| t.batch);
        assert_eq!(seen, vec![token(0), token(1)]);
        assert_eq!(engine.position(element(0)), Point::new(0.0, 80.0));
    }

    #[test]
    fn test_release_forgets_menu() {
        let (tx, _rx) = async_channel::unbounded();
        let mut engine = TweenEngine::new(tx);
        engine.place(element(0), Point::new(3.0, 4.0));
        engine.place(ElementRef::new(MenuHandle::from(2), 0), Point::new(7.0, 7.0));

        engine.release(MenuHandle::from(1));
        assert_eq!(engine.position(element(0)), Point::ORIGIN);
        assert_eq!(
            engine.position(ElementRef::new(MenuHandle::from(2), 0)),
            Point::new(7.0, 7.0)
        );
    }
}
