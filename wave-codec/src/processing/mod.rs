pub mod chunk_reader;
pub mod header_writer;
pub mod sample_buffer;
pub mod sample_codec;
pub mod synth;
