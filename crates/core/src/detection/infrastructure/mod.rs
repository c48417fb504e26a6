pub mod color_space;
pub mod color_space_skin_classifier;
pub mod skin_region_detector;
