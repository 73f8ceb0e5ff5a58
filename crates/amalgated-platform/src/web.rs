//! Browser runner (wasm32): the page's sections over the live document.
//!
//! Section roots are found by `id` (the section anchor) or by a
//! `data-track="<name>"` attribute; each frame's [`patches`] are written to
//! elements carrying `data-reveal="<key>"`.
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use slotmap::SlotMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};
use web_time::Instant;

use amalgated_core::{
    ElementId, FrameScheduler, IntersectionCallback, IntersectionEntry, ObservationId, Rect, TaskFn,
    TaskId, ViewportObserver,
};
use amalgated_site::{ElementHost, PageOptions, SectionStack};

use crate::paint::{Patch, patches};
use crate::{PlatformError, Result};

fn window() -> Result<Window> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn js_err(e: JsValue) -> PlatformError {
    PlatformError::Js(format!("{e:?}"))
}

type EntriesFn = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct WebObservation {
    observer: IntersectionObserver,
    callback: EntriesFn,
}

/// [`ViewportObserver`] over `IntersectionObserver`, one per observation so
/// each gets its own threshold. Entries arrive asynchronously, including the
/// first one.
#[derive(Default)]
pub struct WebViewport {
    elements: RefCell<HashMap<ElementId, Element>>,
    observations: RefCell<SlotMap<ObservationId, Option<WebObservation>>>,
    // disconnected callbacks; the browser may still be running one of them
    retired: RefCell<Vec<EntriesFn>>,
}

impl WebViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element_of(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(&id).cloned()
    }

    pub fn observation_count(&self) -> usize {
        self.observations.borrow().len()
    }

    fn lookup(name: &str) -> Option<Element> {
        let doc = document()?;
        doc.get_element_by_id(name).or_else(|| {
            doc.query_selector(&format!("[data-track=\"{name}\"]"))
                .ok()
                .flatten()
        })
    }

    fn connect(
        target: &Element,
        element: ElementId,
        threshold: f32,
        callback: IntersectionCallback,
    ) -> Result<WebObservation> {
        let on_entries: EntriesFn =
            Closure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    callback(IntersectionEntry {
                        element,
                        ratio: entry.intersection_ratio() as f32,
                        is_intersecting: entry.is_intersecting(),
                    });
                }
            });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold as f64));
        let observer =
            IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init)
                .map_err(js_err)?;
        observer.observe(target);
        Ok(WebObservation {
            observer,
            callback: on_entries,
        })
    }
}

/// Document lookup; `rect` is ignored, the browser owns layout.
impl ElementHost for WebViewport {
    fn element(&self, name: &str, _rect: Rect) -> ElementId {
        let id = ElementId::fresh();
        match Self::lookup(name) {
            Some(el) => {
                self.elements.borrow_mut().insert(id, el);
            }
            None => log::warn!("no #{name} or [data-track=\"{name}\"] in the document"),
        }
        id
    }
}

impl ViewportObserver for WebViewport {
    fn observe(
        &self,
        element: ElementId,
        threshold: f32,
        callback: IntersectionCallback,
    ) -> ObservationId {
        self.retired.borrow_mut().clear();
        let Some(target) = self.element_of(element) else {
            log::debug!("{element:?} is not in the document; it stays hidden");
            return self.observations.borrow_mut().insert(None);
        };
        let observation = match Self::connect(&target, element, threshold, callback) {
            Ok(obs) => Some(obs),
            Err(e) => {
                log::error!("could not observe {element:?}: {e}");
                None
            }
        };
        self.observations.borrow_mut().insert(observation)
    }

    fn unobserve(&self, id: ObservationId) -> bool {
        let Some(slot) = self.observations.borrow_mut().remove(id) else {
            return false;
        };
        if let Some(obs) = slot {
            obs.observer.disconnect();
            self.retired.borrow_mut().push(obs.callback);
        }
        true
    }
}

enum Handle {
    Unset,
    Frame(i32),
    Timeout(i32),
}

struct Pending {
    run: TaskFn,
    handle: Handle,
}

type Tasks = RefCell<SlotMap<TaskId, Pending>>;

/// [`FrameScheduler`] over `requestAnimationFrame` and `setTimeout`.
pub struct WebScheduler {
    window: Window,
    tasks: Rc<Tasks>,
}

impl WebScheduler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            window: window()?,
            tasks: Rc::default(),
        })
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    // The browser-side trampoline is one-shot and only carries the task id;
    // a cancelled task leaks that trampoline, never the task itself.
    fn trampoline(&self, id: TaskId) -> JsValue {
        let tasks = Rc::downgrade(&self.tasks);
        Closure::once_into_js(move || fire(&tasks, id))
    }

    fn arm(&self, id: TaskId, handle: std::result::Result<Handle, JsValue>) {
        let mut tasks = self.tasks.borrow_mut();
        match handle {
            Ok(handle) => {
                if let Some(task) = tasks.get_mut(id) {
                    task.handle = handle;
                }
            }
            Err(e) => {
                log::error!("could not schedule a browser callback: {e:?}");
                tasks.remove(id);
            }
        }
    }
}

fn fire(tasks: &Weak<Tasks>, id: TaskId) {
    let Some(tasks) = tasks.upgrade() else {
        return;
    };
    let task = tasks.borrow_mut().remove(id);
    if let Some(task) = task {
        (task.run)(Instant::now());
    }
}

impl FrameScheduler for WebScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn request_frame(&self, f: TaskFn) -> TaskId {
        let id = self.tasks.borrow_mut().insert(Pending {
            run: f,
            handle: Handle::Unset,
        });
        let cb = self.trampoline(id);
        let handle = self
            .window
            .request_animation_frame(cb.unchecked_ref())
            .map(Handle::Frame);
        self.arm(id, handle);
        id
    }

    fn schedule_at(&self, at: Instant, f: TaskFn) -> TaskId {
        let id = self.tasks.borrow_mut().insert(Pending {
            run: f,
            handle: Handle::Unset,
        });
        let ms = at
            .saturating_duration_since(Instant::now())
            .as_millis()
            .min(i32::MAX as u128) as i32;
        let cb = self.trampoline(id);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
            .map(Handle::Timeout);
        self.arm(id, handle);
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let Some(task) = self.tasks.borrow_mut().remove(id) else {
            return false;
        };
        match task.handle {
            Handle::Frame(h) => {
                let _ = self.window.cancel_animation_frame(h);
            }
            Handle::Timeout(h) => self.window.clear_timeout_with_handle(h),
            Handle::Unset => {}
        }
        true
    }
}

struct Runner {
    stack: RefCell<SectionStack>,
    // owns the observers the stack's trackers registered with
    viewport: Rc<WebViewport>,
    scheduler: Rc<WebScheduler>,
    paint: Cell<Option<TaskId>>,
    styled: RefCell<HashMap<String, Option<HtmlElement>>>,
}

impl Runner {
    fn schedule_paint(this: &Rc<Self>) {
        let weak = Rc::downgrade(this);
        let id = this.scheduler.request_frame(Box::new(move |now| {
            if let Some(runner) = weak.upgrade()
                && runner.stack.borrow().is_mounted()
            {
                runner.paint(now);
                Runner::schedule_paint(&runner);
            }
        }));
        this.paint.set(Some(id));
    }

    fn paint(&self, now: Instant) {
        let view = self.stack.borrow().render(now);
        for patch in patches(&view) {
            self.apply(&patch);
        }
    }

    fn apply(&self, patch: &Patch<'_>) {
        let key = patch.key;
        let mut styled = self.styled.borrow_mut();
        let el = styled.entry(key.to_owned()).or_insert_with(|| {
            document()?
                .query_selector(&format!("[data-reveal=\"{key}\"]"))
                .ok()
                .flatten()?
                .dyn_into::<HtmlElement>()
                .ok()
        });
        let Some(el) = el else {
            return;
        };
        let style = el.style();
        for (name, value) in &patch.styles {
            let _ = style.set_property(name, value);
        }
        if let Some(text) = patch.text
            && el.text_content().as_deref() != Some(text)
        {
            el.set_text_content(Some(text));
        }
    }

    fn stop(&self) {
        if let Some(id) = self.paint.take() {
            self.scheduler.cancel(id);
        }
        let mut stack = self.stack.borrow_mut();
        if stack.is_mounted() {
            stack.dispose();
            log::info!("page unmounted");
        }
    }
}

/// Handle to the mounted page; unmounts when dropped on the Rust side or
/// freed from JS.
#[wasm_bindgen]
pub struct WebPage {
    runner: Rc<Runner>,
}

#[wasm_bindgen]
impl WebPage {
    pub fn unmount(&self) {
        self.runner.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.runner.stack.borrow().is_mounted()
    }

    /// Live intersection observations.
    #[wasm_bindgen(getter)]
    pub fn observations(&self) -> usize {
        self.runner.viewport.observation_count()
    }

    #[wasm_bindgen(getter)]
    pub fn pending_tasks(&self) -> usize {
        self.runner.scheduler.pending()
    }
}

impl Drop for WebPage {
    fn drop(&mut self) {
        self.runner.stop();
    }
}

/// JS entry point. `options_json` is an optional `PageOptions` document.
#[wasm_bindgen]
pub fn mount_page(options_json: Option<String>) -> std::result::Result<WebPage, JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let _ = console_log::init_with_level(log::Level::Info);
    mount(options_json.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub fn mount(options_json: Option<&str>) -> Result<WebPage> {
    let options = match options_json {
        Some(json) => PageOptions::from_json(json)?,
        None => PageOptions::default(),
    };
    let assets = options.load_assets()?;
    let viewport = Rc::new(WebViewport::new());
    let scheduler = Rc::new(WebScheduler::new()?);
    let stack = SectionStack::mount(
        &options,
        assets,
        viewport.clone(),
        viewport.clone(),
        scheduler.clone(),
    );
    log::info!(
        "mounted {} sections, {} observations",
        stack.len(),
        viewport.observation_count()
    );

    let runner = Rc::new(Runner {
        stack: RefCell::new(stack),
        viewport,
        scheduler,
        paint: Cell::new(None),
        styled: RefCell::new(HashMap::new()),
    });
    Runner::schedule_paint(&runner);
    Ok(WebPage { runner })
}
