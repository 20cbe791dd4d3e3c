pub mod json_phrase_writer;
pub mod json_transcript_reader;
