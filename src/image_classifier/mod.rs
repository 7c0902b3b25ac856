pub mod coco;
pub mod hosted_payload;
pub mod impl_fake;
pub mod impl_hosted;
pub mod impl_tract_emotion;
pub mod impl_tract_onnx;
pub mod interface;
pub mod tract;
