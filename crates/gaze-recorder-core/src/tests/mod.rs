mod capture;
mod recording;
