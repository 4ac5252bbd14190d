// crates/dragview-wasm/src/lib.rs

mod utils;

use wasm_bindgen::prelude::*;

use dragview_core::ViewerConfig;
use dragview_renderer::{Frame, InputEvent, Viewer};

use crate::utils::{button_from_dom, key_from_dom, mat4_to_vec, to_js_error};

// パニック時のスタックトレース表示とログ出力の初期化
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // a second init (e.g. module reload) keeps the existing logger
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Engine構造体
/// Viewerをラップし、JSから操作可能なAPIを提供
#[wasm_bindgen]
pub struct Engine {
    viewer: Viewer,
    frame: Frame,
}

#[wasm_bindgen]
impl Engine {
    /// 新しいEngineを作成
    /// `config_json` は部分的なJSONでもよい（省略時はデフォルト）
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Engine, JsValue> {
        log::info!("Creating Engine...");
        let mut viewer = match config_json {
            Some(json) => {
                let config = ViewerConfig::from_json_str(&json).map_err(to_js_error)?;
                Viewer::from_config(&config).map_err(to_js_error)?
            }
            None => Viewer::new(),
        };
        let frame = viewer.frame();
        log::info!("Engine created successfully");
        Ok(Self { viewer, frame })
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// `button` は `MouseEvent.button` の値。戻り値は再描画が必要かどうか
    pub fn pointer_down(&mut self, x: f32, y: f32, button: i16) -> bool {
        match button_from_dom(button) {
            Some(button) => self.handle(InputEvent::PointerPressed { x, y, button }),
            None => false,
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.handle(InputEvent::PointerMoved { x, y })
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, button: i16) -> bool {
        match button_from_dom(button) {
            Some(button) => self.handle(InputEvent::PointerReleased { x, y, button }),
            None => false,
        }
    }

    pub fn wheel(&mut self, delta_y: f32) -> bool {
        self.handle(InputEvent::Wheel { delta_y })
    }

    /// `key` は `KeyboardEvent.key` の値
    pub fn key_up(&mut self, key: &str) -> bool {
        match key_from_dom(key) {
            Some(key) => self.handle(InputEvent::KeyReleased { key }),
            None => false,
        }
    }

    /// Canvasリサイズ
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.handle(InputEvent::Resized { width, height })
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// フレーム更新
    /// レイキャスト中はPickReport、それ以外はnullを返す
    pub fn tick(&mut self) -> Result<JsValue, JsValue> {
        self.frame = self.viewer.frame();
        self.pick_report()
    }

    /// 直前のフレームのPickReport
    pub fn pick_report(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.frame.pick)?)
    }

    /// View行列（列優先16要素）
    pub fn view_matrix(&self) -> Vec<f32> {
        mat4_to_vec(&self.frame.uniform.view)
    }

    /// Projection行列（列優先16要素）
    pub fn projection_matrix(&self) -> Vec<f32> {
        mat4_to_vec(&self.frame.uniform.projection)
    }

    /// 球のモデル行列（列優先16要素）
    pub fn sphere_model_matrix(&self) -> Vec<f32> {
        mat4_to_vec(&self.frame.sphere_model.model)
    }

    /// 球の中心位置（x, y, zの配列）
    pub fn sphere_position(&self) -> Vec<f32> {
        self.viewer.sphere().position().to_array().to_vec()
    }

    // ========================================================================
    // Camera controls
    // ========================================================================

    pub fn set_view_angle(&mut self, degrees: f32) -> Result<(), JsValue> {
        self.viewer.set_view_angle(degrees).map_err(to_js_error)
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> Result<(), JsValue> {
        self.viewer.set_clip_planes(near, far).map_err(to_js_error)
    }

    /// u, v, w 軸まわりの回転角（度）
    pub fn set_rotation(&mut self, u: f32, v: f32, w: f32) {
        self.viewer.set_rotation(u, v, w);
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.viewer.set_wireframe(wireframe);
    }

    pub fn wireframe(&self) -> bool {
        self.viewer.wireframe()
    }

    pub fn is_dragging(&self) -> bool {
        self.viewer.is_dragging()
    }

    fn handle(&mut self, event: InputEvent) -> bool {
        self.viewer.handle_event(event).repaint
    }
}
