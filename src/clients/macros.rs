#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: &str,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id.to_string()).await
                }

                /// Like the plain getter, but a missing record is a `NotFound` error.
                pub async fn [<require_ $entity_name_snake>](
                    &self,
                    id: &str,
                ) -> Result<$entity, $error> {
                    self.[<get_ $entity_name_snake>](id).await?.ok_or_else(|| {
                        <$error>::from($crate::actor_framework::FrameworkError::NotFound(format!(
                            "{} {}",
                            <$entity as $crate::actor_framework::Entity>::KIND,
                            id
                        )))
                    })
                }

                #[tracing::instrument(skip(self, filter))]
                pub async fn [<find_ $entity_name_snake s>](
                    &self,
                    filter: impl Fn(&$entity) -> bool + Send + Sync + 'static,
                ) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.query(filter).await
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, $entity, $error, $entity_name_snake);
    };
}
