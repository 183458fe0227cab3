/// Generates a typed client method that sends one request to the inventory
/// actor and awaits its reply.
///
/// Parameter names must match the field names of the request variant.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> $crate::error::InventoryResult<$return_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($crate::actor_framework::$request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::InventoryError::ActorCommunication("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::error::InventoryError::ActorCommunication("Actor dropped".to_string()))?
            }
        }
    };
}
