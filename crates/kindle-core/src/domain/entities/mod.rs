pub mod config;
pub mod disk;
pub mod filesystem;
pub mod node;
pub mod passwd;
pub mod systemd;

pub use config::{Config, Ignition, Storage};
pub use disk::{Disk, Partition};
pub use filesystem::Filesystem;
pub use node::{Directory, File, Link, Node, NodeGroup, NodeUser, Resource, Verification};
pub use passwd::{Group, Passwd, User};
pub use systemd::{Dropin, Systemd, Unit};
