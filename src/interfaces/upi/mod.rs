pub mod encoder;
pub mod response_parser;
