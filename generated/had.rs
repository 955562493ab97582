#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPeerMessage {
    #[prost(int32, tag = "1")]
    pub sender_id: i32,
    #[prost(string, tag = "2")]
    pub controllee_name: ::prost::alloc::string::String,
    /// Comma separated canonical peer list of the sender.
    #[prost(string, tag = "3")]
    pub peer_list: ::prost::alloc::string::String,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPeerAck {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoChildCommand {
    #[prost(string, tag = "1")]
    pub controllee_name: ::prost::alloc::string::String,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMasterAck {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicationNotice {
    #[prost(string, tag = "1")]
    pub had_address: ::prost::alloc::string::String,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReplicationAck {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStatusRecord {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub my_address: ::prost::alloc::string::String,
    #[prost(bool, tag = "3")]
    pub is_active: bool,
    #[prost(string, tag = "4")]
    pub peer_list: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub controllee_name: ::prost::alloc::string::String,
    #[prost(int32, tag = "6")]
    pub index: i32,
    #[prost(int32, tag = "7")]
    pub self_id: i32,
    #[prost(int64, tag = "8")]
    pub daemon_start_time: i64,
    #[prost(int64, tag = "9")]
    pub current_time: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoInvalidateRecord {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}
/// Empty
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCollectorAck {}
#[doc = r" Generated client implementations."]
pub mod grpc_had_peer_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Kind of message is implied by which RPC is called."]
    pub struct GrpcHadPeerClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcHadPeerClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcHadPeerClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        #[doc = " Leader heartbeat."]
        pub async fn alive(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPeerMessage>,
        ) -> Result<tonic::Response<super::ProtoPeerAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcHadPeer/Alive");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Election ballot."]
        pub async fn send_id(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPeerMessage>,
        ) -> Result<tonic::Response<super::ProtoPeerAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcHadPeer/SendId");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcHadPeerClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcHadPeerClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcHadPeerClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_master_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcMasterClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcMasterClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcMasterClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn child_on(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoChildCommand>,
        ) -> Result<tonic::Response<super::ProtoMasterAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcMaster/ChildOn");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn child_off_fast(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoChildCommand>,
        ) -> Result<tonic::Response<super::ProtoMasterAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcMaster/ChildOffFast");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcMasterClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcMasterClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcMasterClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_replication_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcReplicationClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcReplicationClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcReplicationClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn after_election(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoReplicationNotice>,
        ) -> Result<tonic::Response<super::ProtoReplicationAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcReplication/AfterElection");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn after_leader(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoReplicationNotice>,
        ) -> Result<tonic::Response<super::ProtoReplicationAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcReplication/AfterLeader");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn in_leader(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoReplicationNotice>,
        ) -> Result<tonic::Response<super::ProtoReplicationAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcReplication/InLeader");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcReplicationClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcReplicationClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcReplicationClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_collector_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcCollectorClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcCollectorClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcCollectorClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn update_ad(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStatusRecord>,
        ) -> Result<tonic::Response<super::ProtoCollectorAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcCollector/UpdateAd");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn invalidate_ad(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoInvalidateRecord>,
        ) -> Result<tonic::Response<super::ProtoCollectorAck>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/had.GrpcCollector/InvalidateAd");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcCollectorClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcCollectorClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcCollectorClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_had_peer_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcHadPeerServer."]
    #[async_trait]
    pub trait GrpcHadPeer: Send + Sync + 'static {
        #[doc = " Leader heartbeat."]
        async fn alive(
            &self,
            request: tonic::Request<super::ProtoPeerMessage>,
        ) -> Result<tonic::Response<super::ProtoPeerAck>, tonic::Status>;
        #[doc = " Election ballot."]
        async fn send_id(
            &self,
            request: tonic::Request<super::ProtoPeerMessage>,
        ) -> Result<tonic::Response<super::ProtoPeerAck>, tonic::Status>;
    }
    #[doc = " Kind of message is implied by which RPC is called."]
    #[derive(Debug)]
    pub struct GrpcHadPeerServer<T: GrpcHadPeer> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcHadPeer> GrpcHadPeerServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcHadPeerServer<T>
    where
        T: GrpcHadPeer,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/had.GrpcHadPeer/Alive" => {
                    #[allow(non_camel_case_types)]
                    struct AliveSvc<T: GrpcHadPeer>(pub Arc<T>);
                    impl<T: GrpcHadPeer> tonic::server::UnaryService<super::ProtoPeerMessage> for AliveSvc<T> {
                        type Response = super::ProtoPeerAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPeerMessage>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).alive(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = AliveSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/had.GrpcHadPeer/SendId" => {
                    #[allow(non_camel_case_types)]
                    struct SendIdSvc<T: GrpcHadPeer>(pub Arc<T>);
                    impl<T: GrpcHadPeer> tonic::server::UnaryService<super::ProtoPeerMessage> for SendIdSvc<T> {
                        type Response = super::ProtoPeerAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPeerMessage>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).send_id(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = SendIdSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcHadPeer> Clone for GrpcHadPeerServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcHadPeer> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcHadPeer> tonic::transport::NamedService for GrpcHadPeerServer<T> {
        const NAME: &'static str = "had.GrpcHadPeer";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_master_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcMasterServer."]
    #[async_trait]
    pub trait GrpcMaster: Send + Sync + 'static {
        async fn child_on(
            &self,
            request: tonic::Request<super::ProtoChildCommand>,
        ) -> Result<tonic::Response<super::ProtoMasterAck>, tonic::Status>;
        async fn child_off_fast(
            &self,
            request: tonic::Request<super::ProtoChildCommand>,
        ) -> Result<tonic::Response<super::ProtoMasterAck>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcMasterServer<T: GrpcMaster> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcMaster> GrpcMasterServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcMasterServer<T>
    where
        T: GrpcMaster,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/had.GrpcMaster/ChildOn" => {
                    #[allow(non_camel_case_types)]
                    struct ChildOnSvc<T: GrpcMaster>(pub Arc<T>);
                    impl<T: GrpcMaster> tonic::server::UnaryService<super::ProtoChildCommand> for ChildOnSvc<T> {
                        type Response = super::ProtoMasterAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoChildCommand>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).child_on(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ChildOnSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/had.GrpcMaster/ChildOffFast" => {
                    #[allow(non_camel_case_types)]
                    struct ChildOffFastSvc<T: GrpcMaster>(pub Arc<T>);
                    impl<T: GrpcMaster> tonic::server::UnaryService<super::ProtoChildCommand> for ChildOffFastSvc<T> {
                        type Response = super::ProtoMasterAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoChildCommand>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).child_off_fast(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ChildOffFastSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcMaster> Clone for GrpcMasterServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcMaster> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcMaster> tonic::transport::NamedService for GrpcMasterServer<T> {
        const NAME: &'static str = "had.GrpcMaster";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_replication_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcReplicationServer."]
    #[async_trait]
    pub trait GrpcReplication: Send + Sync + 'static {
        async fn after_election(
            &self,
            request: tonic::Request<super::ProtoReplicationNotice>,
        ) -> Result<tonic::Response<super::ProtoReplicationAck>, tonic::Status>;
        async fn after_leader(
            &self,
            request: tonic::Request<super::ProtoReplicationNotice>,
        ) -> Result<tonic::Response<super::ProtoReplicationAck>, tonic::Status>;
        async fn in_leader(
            &self,
            request: tonic::Request<super::ProtoReplicationNotice>,
        ) -> Result<tonic::Response<super::ProtoReplicationAck>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcReplicationServer<T: GrpcReplication> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcReplication> GrpcReplicationServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcReplicationServer<T>
    where
        T: GrpcReplication,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/had.GrpcReplication/AfterElection" => {
                    #[allow(non_camel_case_types)]
                    struct AfterElectionSvc<T: GrpcReplication>(pub Arc<T>);
                    impl<T: GrpcReplication>
                        tonic::server::UnaryService<super::ProtoReplicationNotice>
                        for AfterElectionSvc<T>
                    {
                        type Response = super::ProtoReplicationAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoReplicationNotice>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).after_election(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = AfterElectionSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/had.GrpcReplication/AfterLeader" => {
                    #[allow(non_camel_case_types)]
                    struct AfterLeaderSvc<T: GrpcReplication>(pub Arc<T>);
                    impl<T: GrpcReplication>
                        tonic::server::UnaryService<super::ProtoReplicationNotice>
                        for AfterLeaderSvc<T>
                    {
                        type Response = super::ProtoReplicationAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoReplicationNotice>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).after_leader(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = AfterLeaderSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/had.GrpcReplication/InLeader" => {
                    #[allow(non_camel_case_types)]
                    struct InLeaderSvc<T: GrpcReplication>(pub Arc<T>);
                    impl<T: GrpcReplication>
                        tonic::server::UnaryService<super::ProtoReplicationNotice>
                        for InLeaderSvc<T>
                    {
                        type Response = super::ProtoReplicationAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoReplicationNotice>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).in_leader(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = InLeaderSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcReplication> Clone for GrpcReplicationServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcReplication> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcReplication> tonic::transport::NamedService for GrpcReplicationServer<T> {
        const NAME: &'static str = "had.GrpcReplication";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_collector_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcCollectorServer."]
    #[async_trait]
    pub trait GrpcCollector: Send + Sync + 'static {
        async fn update_ad(
            &self,
            request: tonic::Request<super::ProtoStatusRecord>,
        ) -> Result<tonic::Response<super::ProtoCollectorAck>, tonic::Status>;
        async fn invalidate_ad(
            &self,
            request: tonic::Request<super::ProtoInvalidateRecord>,
        ) -> Result<tonic::Response<super::ProtoCollectorAck>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcCollectorServer<T: GrpcCollector> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcCollector> GrpcCollectorServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcCollectorServer<T>
    where
        T: GrpcCollector,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/had.GrpcCollector/UpdateAd" => {
                    #[allow(non_camel_case_types)]
                    struct UpdateAdSvc<T: GrpcCollector>(pub Arc<T>);
                    impl<T: GrpcCollector> tonic::server::UnaryService<super::ProtoStatusRecord> for UpdateAdSvc<T> {
                        type Response = super::ProtoCollectorAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStatusRecord>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).update_ad(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = UpdateAdSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/had.GrpcCollector/InvalidateAd" => {
                    #[allow(non_camel_case_types)]
                    struct InvalidateAdSvc<T: GrpcCollector>(pub Arc<T>);
                    impl<T: GrpcCollector> tonic::server::UnaryService<super::ProtoInvalidateRecord>
                        for InvalidateAdSvc<T>
                    {
                        type Response = super::ProtoCollectorAck;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoInvalidateRecord>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).invalidate_ad(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = InvalidateAdSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcCollector> Clone for GrpcCollectorServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcCollector> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcCollector> tonic::transport::NamedService for GrpcCollectorServer<T> {
        const NAME: &'static str = "had.GrpcCollector";
    }
}
