pub mod volume_avg;

pub use volume_avg::VolumeAverage;
