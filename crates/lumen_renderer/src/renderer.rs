//! Render scheduler: casts one primary ray per pixel into a pixel sink.
//!
//! Two execution modes produce identical images:
//! - Sequential: every pixel on the calling thread, row by row.
//! - Parallel: a fixed rayon pool whose workers pull single pixels from a
//!   shared cursor until the image is exhausted.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use crate::camera::Camera;
use crate::cursor::{Pixel, PixelCursor};
use crate::error::{CameraError, RenderError, RenderResult};
use crate::image_buffer::PixelSink;
use crate::tracer::RayTracer;

/// Cores left free when picking a thread count automatically.
pub const SPARE_THREADS: usize = 2;

/// Receives progress while an image renders.
pub trait ProgressObserver: Send + Sync {
    /// Called each time another whole percent of the pixels has been handed out.
    fn on_milestone(&self, percent: u32);
}

/// Reports progress through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_milestone(&self, percent: u32) {
        log::info!("Rendered {}%", percent);
    }
}

/// How pixels are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Sequential,
    Parallel {
        threads: usize,
    },
}

/// Resolve a requested worker count. 0 picks one from the available cores.
pub fn resolve_thread_count(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    let cores = num_cpus::get().saturating_sub(SPARE_THREADS);
    if cores <= 2 {
        1
    } else {
        cores
    }
}

/// Drives a ray tracer over every pixel of a sink.
#[derive(Default)]
pub struct Renderer {
    camera: Option<Camera>,
    ray_tracer: Option<Arc<dyn RayTracer>>,
    pixel_sink: Option<Arc<dyn PixelSink>>,
    execution: Execution,
    progress: Option<Arc<dyn ProgressObserver>>,
}

impl Renderer {
    /// Create a sequential renderer with nothing attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_ray_tracer(mut self, ray_tracer: Arc<dyn RayTracer>) -> Self {
        self.ray_tracer = Some(ray_tracer);
        self
    }

    pub fn with_pixel_sink(mut self, pixel_sink: Arc<dyn PixelSink>) -> Self {
        self.pixel_sink = Some(pixel_sink);
        self
    }

    /// Render on a pool of `threads` workers; 0 picks a count from the cores.
    pub fn with_multithreading(mut self, threads: usize) -> Self {
        self.execution = Execution::Parallel {
            threads: resolve_thread_count(threads),
        };
        self
    }

    /// Render on the calling thread.
    pub fn with_sequential(mut self) -> Self {
        self.execution = Execution::Sequential;
        self
    }

    pub fn with_progress(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.progress = Some(observer);
        self
    }

    /// Log progress milestones.
    pub fn with_debug_print(self) -> Self {
        self.with_progress(Arc::new(LogProgress))
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Trace every pixel of the sink and write the colors into it.
    pub fn render_image(&self) -> RenderResult<()> {
        let camera = self.camera.as_ref().ok_or(RenderError::MissingCamera)?;
        let tracer = self
            .ray_tracer
            .as_deref()
            .ok_or(RenderError::MissingRayTracer)?;
        let sink = self
            .pixel_sink
            .as_deref()
            .ok_or(RenderError::MissingPixelSink)?;

        let (nx, ny) = sink.resolution();
        camera.validate(nx, ny)?;

        let job = RenderJob {
            camera,
            tracer,
            sink,
            progress: self.progress.as_deref(),
            nx,
            ny,
        };

        log::info!("Rendering {}x{} ({} pixels)", nx, ny, nx as u64 * ny as u64);
        let start = Instant::now();

        match self.execution {
            Execution::Sequential => job.run_sequential()?,
            Execution::Parallel { threads } => job.run_parallel(threads)?,
        }

        log::info!("Render complete in {:.2?}", start.elapsed());
        Ok(())
    }
}

/// Borrowed view of everything one render needs.
struct RenderJob<'a> {
    camera: &'a Camera,
    tracer: &'a dyn RayTracer,
    sink: &'a dyn PixelSink,
    progress: Option<&'a dyn ProgressObserver>,
    nx: u32,
    ny: u32,
}

impl RenderJob<'_> {
    fn cast_ray(&self, pixel: Pixel) -> Result<(), CameraError> {
        let ray = self
            .camera
            .construct_ray_through_pixel(self.nx, self.ny, pixel.col, pixel.row)?;
        self.sink
            .write_pixel(pixel.col, pixel.row, self.tracer.trace_ray(&ray));
        Ok(())
    }

    /// Forward a milestone to the observer. Called as the pixel is handed out,
    /// so milestones arrive in increasing order.
    fn report(&self, pixel: &Pixel) {
        if let (Some(observer), Some(percent)) = (self.progress, pixel.milestone) {
            observer.on_milestone(percent);
        }
    }

    fn run_sequential(&self) -> Result<(), CameraError> {
        let mut cursor = PixelCursor::new(self.nx, self.ny);
        while let Some(pixel) = cursor.next_pixel() {
            if pixel.col == 0 {
                log::trace!("Row {}/{}", pixel.row + 1, self.ny);
            }
            self.report(&pixel);
            self.cast_ray(pixel)?;
        }
        Ok(())
    }

    fn run_parallel(&self, threads: usize) -> RenderResult<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("lumen-render-{}", i))
            .build()?;
        log::debug!("Render pool started with {} threads", threads);

        let cursor = Mutex::new(PixelCursor::new(self.nx, self.ny));
        let failure: Mutex<Option<CameraError>> = Mutex::new(None);

        pool.scope(|s| {
            for _ in 0..threads {
                s.spawn(|_| loop {
                    let next = {
                        let mut cursor = cursor.lock().unwrap_or_else(PoisonError::into_inner);
                        let next = cursor.next_pixel();
                        // Reported under the lock so no later milestone can overtake it
                        if let Some(pixel) = &next {
                            self.report(pixel);
                        }
                        next
                    };
                    let Some(pixel) = next else {
                        break;
                    };

                    if let Err(e) = self.cast_ray(pixel) {
                        cursor.lock().unwrap_or_else(PoisonError::into_inner).finish();
                        failure
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .get_or_insert(e);
                        break;
                    }
                });
            }
        });

        match failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}
