pub mod label_encoder;
pub mod feature_encoder;
pub mod scaler;

pub use label_encoder::LabelEncoder;
pub use feature_encoder::{EncodedDataset, FeatureEncoder, FEATURE_COUNT, FEATURE_NAMES};
pub use scaler::{ScalingStats, StandardScaler};
