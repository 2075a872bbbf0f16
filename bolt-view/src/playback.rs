//! Looping strike animation derived from segment iterations.
//!
//! Every segment becomes visible at the frame equal to the iteration it
//! was created in and disappears `iterations + HIDE_DELAY` frames later,
//! so the bolt first grows, holds, then vanishes in the same order.

/// Frames between the end of growth and the first segment disappearing.
pub const HIDE_DELAY: u32 = 20;

/// Extra frames kept after the last segment disappears.
pub const TAIL_FRAMES: u32 = 15;

/// Keyframe windows for one grown bolt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    hide_offset: u32,
    end_frame: u32,
}

impl Timeline {
    /// Builds the timeline for a run of `iterations` iterations whose
    /// newest segment was created in `last_iteration`.
    pub fn new(iterations: u32, last_iteration: u32) -> Self {
        let hide_offset = iterations + HIDE_DELAY;
        Self {
            hide_offset,
            end_frame: last_iteration + hide_offset + TAIL_FRAMES,
        }
    }

    /// First frame on which a segment from `iteration` is shown.
    pub fn appear_frame(&self, iteration: u32) -> u32 {
        iteration
    }

    /// First frame on which a segment from `iteration` is hidden again.
    pub fn disappear_frame(&self, iteration: u32) -> u32 {
        iteration + self.hide_offset
    }

    pub fn is_visible(&self, iteration: u32, frame: u32) -> bool {
        frame >= self.appear_frame(iteration) && frame < self.disappear_frame(iteration)
    }

    /// Length of one loop, in frames.
    pub fn end_frame(&self) -> u32 {
        self.end_frame
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
}

/// Drives a [`Timeline`] from wall-clock time.
#[derive(Debug, Clone)]
pub struct Playback {
    timeline: Timeline,
    frame: f64,
    fps: f64,
    state: PlaybackState,
}

impl Playback {
    pub fn new(timeline: Timeline, fps: f64, autoplay: bool) -> Self {
        Self {
            timeline,
            frame: 0.0,
            fps,
            state: if autoplay {
                PlaybackState::Playing
            } else {
                PlaybackState::Paused
            },
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whole frame currently shown.
    pub fn current_frame(&self) -> u32 {
        self.frame as u32
    }

    pub fn set_fps(&mut self, fps: f64) {
        self.fps = fps.max(0.0);
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
        }
    }

    /// Jumps to `frame`, clamped to the loop.
    pub fn seek(&mut self, frame: u32) {
        self.frame = frame.min(self.timeline.end_frame()) as f64;
    }

    /// Advances by `dt` seconds while playing, wrapping at the loop end.
    pub fn advance(&mut self, dt: f64) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let end = self.timeline.end_frame().max(1) as f64;
        self.frame = (self.frame + dt * self.fps) % end;
    }

    /// Whether a segment created in `iteration` is on screen now.
    ///
    /// While paused on frame 0 the whole bolt is shown, which is what
    /// the viewer displays before the animation is started.
    pub fn shows(&self, iteration: u32) -> bool {
        if self.state == PlaybackState::Paused && self.current_frame() == 0 {
            return true;
        }
        self.timeline.is_visible(iteration, self.current_frame())
    }

    /// Position in the loop as 0.0 - 1.0.
    pub fn progress(&self) -> f64 {
        let end = self.timeline.end_frame();
        if end == 0 {
            0.0
        } else {
            self.frame / end as f64
        }
    }
}
