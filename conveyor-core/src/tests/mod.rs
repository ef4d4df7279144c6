mod pipeline;
mod workers;
