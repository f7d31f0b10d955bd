pub mod callsign;
