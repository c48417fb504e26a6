pub mod shared {
    pub mod analyzer_config;
    pub mod constants;
    pub mod detection;
    pub mod frame;
    pub mod orientation;
    pub mod region;
    pub mod sequence_metadata;
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod orientation_estimator;
        pub mod orientation_smoother;
        pub mod skin_classifier;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod analysis_logger;
    pub mod analyze_sequence_use_case;
    pub mod detection_history;
    pub mod frame_analyzer;
}

pub mod video {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure {
        pub mod image_sequence_reader;
    }
}
