mod google_vision_adapter;

pub use google_vision_adapter::GoogleVisionAdapter;
