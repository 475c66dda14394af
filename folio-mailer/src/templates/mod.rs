mod contact;

pub use contact::ContactTemplate;
