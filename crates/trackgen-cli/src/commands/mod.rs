pub mod kinematics;
pub mod list;
pub mod write;
