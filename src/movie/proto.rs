//! Bindings for the `movieapi.MovieInfo` gRPC service, generated at build time from
//! `proto/movieapi.proto`.
#![allow(missing_docs)]

tonic::include_proto!("movieapi");
