use std::path::PathBuf;

use crate::capture::{FrameSource, SnapshotNamer, SnapshotSink};
use crate::core::layout::DirectoryLayout;
use crate::shared::category::Category;
use crate::shared::error::{CollectorResult, Notice};
use crate::ui::{FeedSurface, InputEvent, StatusOverlay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Recording,
    Terminated,
}

/// Operator-visible state of one run. Only user commands change it.
#[derive(Debug, Default)]
pub struct SessionState {
    selected: Option<Category>,
    recording: bool,
    image_counter: u64,
    terminated: bool,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        if self.terminated {
            Phase::Terminated
        } else if self.recording {
            Phase::Recording
        } else {
            Phase::Idle
        }
    }

    pub fn selected(&self) -> Option<&Category> {
        self.selected.as_ref()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn image_counter(&self) -> u64 {
        self.image_counter
    }

    pub fn overlay(&self) -> StatusOverlay {
        StatusOverlay {
            recording: self.is_recording(),
            category: self.selected().map(|c| c.to_string()),
            image_counter: self.image_counter(),
        }
    }
}

/// Result of handling one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    Captured(PathBuf),
    Warned(Notice),
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub images_captured: u64,
    pub last_category: Option<Category>,
}

/// Owns the camera, the feed surface and the snapshot encoder for the whole
/// run and drives the read/show/poll loop on the calling thread.
pub struct CaptureSession<S, W, K>
where
    S: FrameSource,
    W: FeedSurface<S::Frame>,
    K: SnapshotSink<S::Frame>,
{
    source: S,
    surface: W,
    sink: K,
    layout: DirectoryLayout,
    namer: SnapshotNamer,
    state: SessionState,
    torn_down: bool,
}

impl<S, W, K> CaptureSession<S, W, K>
where
    S: FrameSource,
    W: FeedSurface<S::Frame>,
    K: SnapshotSink<S::Frame>,
{
    /// Prepares the directory tree, then opens the device.
    /// Nothing is shown if either step fails.
    pub fn initialize<F>(layout: DirectoryLayout, open_source: F, surface: W, sink: K) -> CollectorResult<Self>
    where
        F: FnOnce() -> CollectorResult<S>,
    {
        let created = layout.initialize()?;
        for dir in &created {
            crate::utils::logger::info(&format!("created {}", dir.display()));
        }

        let source = open_source()?;

        Ok(Self {
            source,
            surface,
            sink,
            layout,
            namer: SnapshotNamer::new(),
            state: SessionState::default(),
            torn_down: false,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs until quit or a fatal read error, tearing down either way.
    pub fn run(&mut self) -> CollectorResult<SessionSummary> {
        let outcome = self.run_loop();
        if let Err(err) = &outcome {
            crate::utils::logger::error(&format!("session ended: {}", err));
        }
        self.teardown();

        outcome.map(|()| self.summary())
    }

    pub fn run_loop(&mut self) -> CollectorResult<()> {
        while self.state.phase() != Phase::Terminated {
            let frame = self.source.read_frame()?;
            self.surface.show(&frame, &self.state.overlay())?;

            let event = self.surface.poll_input()?;
            if self.handle(event, &frame)? == Step::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Applies one event against the frame that was on screen when it arrived.
    pub fn handle(&mut self, event: InputEvent, frame: &S::Frame) -> CollectorResult<Step> {
        if self.state.terminated {
            return Ok(Step::Stop);
        }

        let step = match event {
            InputEvent::Quit => {
                self.state.terminated = true;
                crate::utils::logger::info("quit requested");
                Step::Stop
            }
            InputEvent::OpenPicker => {
                let picked = self.surface.pick_category(self.layout.categories())?;
                // dismissing the picker keeps the previous selection
                if let Some(category) = picked {
                    self.state.selected = Some(category);
                }
                Step::Continue
            }
            InputEvent::BeginRecording => match &self.state.selected {
                Some(category) => {
                    self.state.recording = true;
                    println!("\nStarted collecting data for category: {}", category);
                    println!("Press 'q' to stop collection");
                    crate::utils::logger::info(&format!("recording started: {}", category));
                    Step::Continue
                }
                None => self.warn(Notice::NoCategorySelected),
            },
            InputEvent::EndRecording => {
                self.state.recording = false;
                println!("\nStopped collecting data");
                crate::utils::logger::info("recording stopped");
                Step::Continue
            }
            InputEvent::Snapshot => self.snapshot(frame),
            InputEvent::Idle => Step::Continue,
        };

        Ok(step)
    }

    /// Recording state does not gate snapshots; only a selected category does.
    fn snapshot(&mut self, frame: &S::Frame) -> Step {
        let Some(category) = self.state.selected.clone() else {
            return self.warn(Notice::NoCategorySelected);
        };

        let file_name = self.namer.file_name(&category);
        let path = self.layout.category_dir(&category).join(&file_name);

        match self.sink.write(&path, frame) {
            Ok(()) => {
                self.state.image_counter += 1;
                println!("Captured image: {}", file_name);
                crate::utils::logger::info(&format!(
                    "captured {} (#{})",
                    path.display(),
                    self.state.image_counter
                ));
                Step::Captured(path)
            }
            Err(err) => self.warn(Notice::SnapshotFailed {
                path,
                reason: err.to_string(),
            }),
        }
    }

    fn warn(&self, notice: Notice) -> Step {
        println!("⚠️  {}", notice);
        crate::utils::logger::warn(&notice.to_string());
        Step::Warned(notice)
    }

    /// Releases the camera and closes every window. Safe to call twice.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if let Err(err) = self.source.release() {
            crate::utils::logger::error(&format!("camera release failed: {}", err));
        }
        self.surface.close();
        crate::utils::logger::debug("session torn down");
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            images_captured: self.state.image_counter(),
            last_category: self.state.selected().cloned(),
        }
    }
}

impl<S, W, K> Drop for CaptureSession<S, W, K>
where
    S: FrameSource,
    W: FeedSurface<S::Frame>,
    K: SnapshotSink<S::Frame>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::category::CategorySet;
    use crate::shared::error::CollectorError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;

    /// Frames are plain numbers; a `None` entry is a failed read.
    struct FakeCamera {
        frames: VecDeque<Option<u32>>,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl FrameSource for FakeCamera {
        type Frame = u32;

        fn read_frame(&mut self) -> CollectorResult<u32> {
            match self.frames.pop_front() {
                Some(Some(frame)) => Ok(frame),
                _ => Err(CollectorError::FrameRead("no frame".to_string())),
            }
        }

        fn release(&mut self) -> CollectorResult<()> {
            self.log.borrow_mut().push("release");
            Ok(())
        }
    }

    struct FakeSurface {
        inputs: VecDeque<InputEvent>,
        picks: VecDeque<Option<&'static str>>,
        shown: Vec<StatusOverlay>,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl FeedSurface<u32> for FakeSurface {
        fn show(&mut self, _frame: &u32, status: &StatusOverlay) -> CollectorResult<()> {
            self.shown.push(status.clone());
            Ok(())
        }

        fn poll_input(&mut self) -> CollectorResult<InputEvent> {
            Ok(self.inputs.pop_front().unwrap_or(InputEvent::Idle))
        }

        fn pick_category(&mut self, _categories: &CategorySet) -> CollectorResult<Option<Category>> {
            let pick = self.picks.pop_front().flatten();
            Ok(pick.map(|name| Category::new(name).unwrap()))
        }

        fn close(&mut self) {
            self.log.borrow_mut().push("close");
        }
    }

    /// Writes the frame number as text so files really land on disk.
    struct TextSink {
        fail: bool,
    }

    impl SnapshotSink<u32> for TextSink {
        fn write(&mut self, path: &Path, frame: &u32) -> CollectorResult<()> {
            if self.fail {
                return Err(CollectorError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            fs::write(path, frame.to_string()).map_err(|source| CollectorError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    type TestSession = CaptureSession<FakeCamera, FakeSurface, TextSink>;

    struct Harness {
        session: TestSession,
        base: PathBuf,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Drop for Harness {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.base);
        }
    }

    fn harness(
        name: &str,
        frames: Vec<Option<u32>>,
        inputs: Vec<InputEvent>,
        picks: Vec<Option<&'static str>>,
        fail_writes: bool,
    ) -> Harness {
        let base = std::env::temp_dir().join(format!("snapcollect_session_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&base);
        let log = Rc::new(RefCell::new(Vec::new()));

        let camera = FakeCamera {
            frames: frames.into(),
            log: log.clone(),
        };
        let surface = FakeSurface {
            inputs: inputs.into(),
            picks: picks.into(),
            shown: Vec::new(),
            log: log.clone(),
        };

        let layout = DirectoryLayout::new(&base, CategorySet::default());
        let session = CaptureSession::initialize(layout, move || Ok(camera), surface, TextSink { fail: fail_writes }).unwrap();

        Harness { session, base, log }
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_snapshot_without_category_is_refused() {
        let mut h = harness("nocat", vec![], vec![], vec![], false);

        let step = h.session.handle(InputEvent::Snapshot, &7).unwrap();
        assert_eq!(step, Step::Warned(Notice::NoCategorySelected));
        assert_eq!(h.session.state().image_counter(), 0);
        for category in CategorySet::default().iter() {
            assert!(files_in(&h.base.join(category.as_str())).is_empty());
        }
    }

    #[test]
    fn test_begin_recording_requires_category() {
        let mut h = harness("begin", vec![], vec![], vec![Some("cap")], false);

        let step = h.session.handle(InputEvent::BeginRecording, &0).unwrap();
        assert_eq!(step, Step::Warned(Notice::NoCategorySelected));
        assert_eq!(h.session.state().phase(), Phase::Idle);

        h.session.handle(InputEvent::OpenPicker, &0).unwrap();
        h.session.handle(InputEvent::BeginRecording, &0).unwrap();
        assert_eq!(h.session.state().phase(), Phase::Recording);

        h.session.handle(InputEvent::EndRecording, &0).unwrap();
        h.session.handle(InputEvent::EndRecording, &0).unwrap();
        assert_eq!(h.session.state().phase(), Phase::Idle);
    }

    #[test]
    fn test_snapshots_count_and_land_in_category_dir() {
        let mut h = harness("snap", vec![], vec![], vec![Some("watch")], false);
        h.session.handle(InputEvent::OpenPicker, &0).unwrap();

        let first = h.session.handle(InputEvent::Snapshot, &1).unwrap();
        assert_eq!(h.session.state().image_counter(), 1);
        let second = h.session.handle(InputEvent::Snapshot, &2).unwrap();
        assert_eq!(h.session.state().image_counter(), 2);
        assert_ne!(first, second);

        let names = files_in(&h.base.join("watch"));
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.starts_with("watch_") && n.ends_with(".jpg")));
    }

    #[test]
    fn test_snapshot_ignores_recording_flag() {
        let mut h = harness("flag", vec![], vec![], vec![Some("comb")], false);
        h.session.handle(InputEvent::OpenPicker, &0).unwrap();
        assert!(!h.session.state().is_recording());

        assert!(matches!(h.session.handle(InputEvent::Snapshot, &3).unwrap(), Step::Captured(_)));
        h.session.handle(InputEvent::BeginRecording, &0).unwrap();
        assert!(matches!(h.session.handle(InputEvent::Snapshot, &4).unwrap(), Step::Captured(_)));
        assert_eq!(h.session.state().image_counter(), 2);
    }

    #[test]
    fn test_dismissed_picker_keeps_selection() {
        let mut h = harness("dismiss", vec![], vec![], vec![Some("mug"), None], false);
        h.session.handle(InputEvent::OpenPicker, &0).unwrap();
        h.session.handle(InputEvent::OpenPicker, &0).unwrap();
        assert_eq!(h.session.state().selected().map(Category::as_str), Some("mug"));
    }

    #[test]
    fn test_failed_write_warns_without_counting() {
        let mut h = harness("fail", vec![], vec![], vec![Some("spoon")], true);
        h.session.handle(InputEvent::OpenPicker, &0).unwrap();

        match h.session.handle(InputEvent::Snapshot, &5).unwrap() {
            Step::Warned(Notice::SnapshotFailed { path, .. }) => {
                assert!(path.starts_with(h.base.join("spoon")));
            }
            other => panic!("unexpected step: {:?}", other),
        }
        assert_eq!(h.session.state().image_counter(), 0);
    }

    #[test]
    fn test_run_until_quit_tears_down_once() {
        let inputs = vec![
            InputEvent::OpenPicker,
            InputEvent::Snapshot,
            InputEvent::Idle,
            InputEvent::Quit,
            InputEvent::Snapshot,
        ];
        let frames = vec![Some(1), Some(2), Some(3), Some(4), Some(5)];
        let mut h = harness("quit", frames, inputs, vec![Some("cap")], false);

        let summary = h.session.run().unwrap();
        assert_eq!(summary.images_captured, 1);
        assert_eq!(summary.last_category.as_ref().map(Category::as_str), Some("cap"));
        assert_eq!(h.session.state().phase(), Phase::Terminated);

        // the overlay reflected the counter on the frame after the capture
        let shown = &h.session.surface.shown;
        assert_eq!(shown.len(), 4);
        assert_eq!(shown[0].category, None);
        assert_eq!(shown[2].image_counter, 1);

        // nothing happens after termination
        assert_eq!(h.session.handle(InputEvent::Snapshot, &9).unwrap(), Step::Stop);
        assert_eq!(h.session.state().image_counter(), 1);

        h.session.teardown();
        assert_eq!(*h.log.borrow(), vec!["release", "close"]);
    }

    #[test]
    fn test_read_failure_is_fatal_but_still_tears_down() {
        let mut h = harness("readfail", vec![Some(1), None], vec![InputEvent::Idle], vec![], false);

        let err = h.session.run().unwrap_err();
        assert!(matches!(err, CollectorError::FrameRead(_)));
        assert_eq!(*h.log.borrow(), vec!["release", "close"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_base_dir_never_opens_camera() {
        use std::cell::Cell;
        use std::os::unix::fs::PermissionsExt;

        let base = std::env::temp_dir().join(format!("snapcollect_session_ro_{}", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        fs::create_dir_all(&base).unwrap();
        fs::set_permissions(&base, fs::Permissions::from_mode(0o555)).unwrap();
        let bypassed = fs::create_dir(base.join("writable")).is_ok();

        let opened = Cell::new(false);
        let log = Rc::new(RefCell::new(Vec::new()));
        let surface = FakeSurface {
            inputs: VecDeque::new(),
            picks: VecDeque::new(),
            shown: Vec::new(),
            log: log.clone(),
        };
        let result: CollectorResult<TestSession> = CaptureSession::initialize(
            DirectoryLayout::new(&base, CategorySet::default()),
            || {
                opened.set(true);
                Ok(FakeCamera {
                    frames: VecDeque::new(),
                    log: log.clone(),
                })
            },
            surface,
            TextSink { fail: false },
        );
        let denied = matches!(&result, Err(CollectorError::PermissionDenied { .. }));
        drop(result);

        fs::set_permissions(&base, fs::Permissions::from_mode(0o755)).unwrap();
        let _ = fs::remove_dir_all(&base);

        if bypassed {
            return;
        }
        assert!(denied);
        assert!(!opened.get());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unavailable_device_aborts_initialize() {
        let base = std::env::temp_dir().join(format!("snapcollect_nodev_{}", std::process::id()));
        let _ = fs::remove_dir_all(&base);
        let log = Rc::new(RefCell::new(Vec::new()));
        let surface = FakeSurface {
            inputs: VecDeque::new(),
            picks: VecDeque::new(),
            shown: Vec::new(),
            log: log.clone(),
        };

        let result: CollectorResult<TestSession> = CaptureSession::initialize(
            DirectoryLayout::new(&base, CategorySet::default()),
            || Err(CollectorError::DeviceUnavailable { index: 3 }),
            surface,
            TextSink { fail: false },
        );

        assert!(matches!(result, Err(CollectorError::DeviceUnavailable { index: 3 })));
        // directories come first, the loop never starts
        assert!(base.join("mug").is_dir());
        assert!(log.borrow().is_empty());

        let _ = fs::remove_dir_all(&base);
    }
}
