#![cfg(target_arch = "wasm32")]

use glam::Mat4;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use ar_depth_engine::ArDemo;

wasm_bindgen_test_configure!(run_in_browser);

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

fn depth_info(width: u32, height: u32, body: &str) -> JsValue {
    let info = Object::new();
    let getter = Function::new_with_args("u, v", body);
    Reflect::set(&info, &"getDepthInMeters".into(), &getter).unwrap();
    Reflect::set(&info, &"width".into(), &width.into()).unwrap();
    Reflect::set(&info, &"height".into(), &height.into()).unwrap();
    info.into()
}

fn started(kind: &str) -> ArDemo {
    let mut demo = ArDemo::new(kind, None).unwrap();
    demo.session_started();
    demo.reference_space_ready();
    demo.hit_test_source_ready(1);
    demo
}

#[wasm_bindgen_test]
fn unknown_kind_is_rejected() {
    assert!(ArDemo::new("vr", None).is_err());
    assert!(ArDemo::new("depth", Some("{not json".into())).is_err());
}

#[wasm_bindgen_test]
fn depth_frame_from_platform_object() {
    let mut demo = started("depth");
    let info = depth_info(4, 3, "return 1.5;");
    assert!(demo.frame(info, &IDENTITY, &[], &[]));
    assert_eq!((demo.grid_width(), demo.grid_height()), (4, 3));
    assert_eq!(demo.positions_len(), 4 * 3 * 3);
    assert_eq!(demo.generation(), 1);
}

#[wasm_bindgen_test]
fn throwing_getter_does_not_abort_the_frame() {
    let mut demo = started("depth");
    let info = depth_info(2, 2, "throw new Error('no depth');");
    assert!(demo.frame(info, &IDENTITY, &[], &[]));
    assert_eq!(demo.generation(), 1);
}

#[wasm_bindgen_test]
fn missing_depth_skips_the_frame() {
    let mut demo = started("occlusion");
    assert!(!demo.frame(JsValue::NULL, &IDENTITY, &[], &[]));
    // Malformed viewer matrix counts as no pose
    assert!(!demo.frame(depth_info(2, 2, "return 1;"), &IDENTITY[..12], &[], &[]));
}

#[wasm_bindgen_test]
fn buffer_frames_drive_hit_test_placement() {
    let mut demo = started("hit-test");
    let hit = Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -1.0)).to_cols_array();
    assert!(demo.frame_with_buffer(vec![1.0; 4], 2, 2, &IDENTITY, &[], &hit));

    demo.select(&IDENTITY);
    assert!(demo.frame_with_buffer(vec![1.0; 4], 2, 2, &IDENTITY, &[], &[]));
    let scene = demo.scene_json();
    assert!(scene.contains("\"id\":1"));
    assert_eq!(demo.frames(), 2);
}

#[wasm_bindgen_test]
fn luminance_alpha_frames_reach_the_heatmap() {
    let mut demo = started("depth");
    // 3x2 of 1500 mm, little-endian u16
    let raw = [0xDC, 0x05].repeat(6);
    assert!(demo.frame_with_luminance_alpha(raw, 3, 2, 0.001, &IDENTITY, &[], &[]));
    assert_eq!((demo.grid_width(), demo.grid_height()), (3, 2));
    assert_eq!(demo.colors_len(), 3 * 2 * 3);

    assert!(!demo.frame_with_luminance_alpha(vec![0; 5], 3, 2, 0.001, &IDENTITY, &[], &[]));
    assert_eq!(demo.generation(), 1);
}

#[wasm_bindgen_test]
fn session_init_is_json() {
    let demo = ArDemo::new("collision", None).unwrap();
    let init = demo.session_init();
    assert!(init.contains("requiredFeatures"));
    assert!(init.contains("hit-test"));
}
