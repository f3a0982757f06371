mod common;
mod integrity;
mod routing;
