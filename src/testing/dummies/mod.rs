mod headers;

pub use headers::mushroom_header;
